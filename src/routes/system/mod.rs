mod handler;
mod model;

pub use handler::{db_stats, get_config, health};
pub use model::{CacheStatus, ConfigResponse, DbStatsResponse, HealthResponse};
