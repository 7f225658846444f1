// 缓存模块
// 进程内的天气结果缓存与会话存储，均带过期清理

pub mod keys;
pub mod models;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use models::session::SessionRecord;
pub use models::weather::CachedWeather;
pub use operations::session::SessionStore;
pub use operations::weather::WeatherCache;
