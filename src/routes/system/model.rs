use serde::Serialize;

pub const SERVICE_NAME: &str = "Weather Backend";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// Unix 时间戳（秒，含小数）
    pub timestamp: f64,
}

/// 服务元数据，不包含任何密钥、连接串或文件路径
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub service_name: String,
    pub version: String,
    pub weather_source: String,
    pub active_sessions: usize,
    pub cache_size: usize,
    pub request_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub weather_cache_size: usize,
    pub session_count: usize,
}

/// 数据库统计，纯值类型，无法形成自引用
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStatsResponse {
    pub total_users: i64,
    pub request_count: u64,
    pub cache_status: CacheStatus,
}
