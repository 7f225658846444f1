/// 缓存数据模型
/// 定义缓存数据的结构体

// 天气缓存模型
pub mod weather;

// 会话模型
pub mod session;

pub use session::SessionRecord;
pub use weather::{CachedWeather, WeatherCacheEntry};
