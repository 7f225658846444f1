/// 存储库实现
pub mod stats;
pub mod user;
