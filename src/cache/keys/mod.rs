/// 缓存键模块
/// 提供缓存键生成函数

// 天气缓存键模块
pub mod weather_keys;

pub use weather_keys::{time_bucket, weather_key};
