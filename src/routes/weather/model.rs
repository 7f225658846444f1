use serde::{Deserialize, Serialize};

use crate::cache::CachedWeather;
use crate::weather::WeatherMetrics;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub city: String,
    pub req_count: u64,
    pub cached: bool,
    #[serde(flatten)]
    pub metrics: WeatherMetrics,
    pub timezone: String,
}

impl WeatherResponse {
    /// 在缓存内容的副本上附加本次请求的字段
    pub fn from_cached(payload: CachedWeather, req_count: u64, cached: bool) -> Self {
        Self {
            city: payload.city,
            req_count,
            cached,
            metrics: payload.metrics,
            timezone: payload.timezone,
        }
    }
}
