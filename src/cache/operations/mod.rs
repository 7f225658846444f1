/// 缓存操作
/// 提供缓存操作的功能实现

// 天气缓存操作
pub mod weather;

// 会话存储操作
pub mod session;

pub use session::SessionStore;
pub use weather::WeatherCache;
