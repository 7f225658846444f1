use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::weather::WeatherMetrics;

/// 天气计算结果缓存数据模型
///
/// 只保存与请求无关的内容，请求序号和命中标记由响应层附加。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CachedWeather {
    pub city: String,
    pub metrics: WeatherMetrics,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct WeatherCacheEntry {
    pub key: String,
    pub payload: CachedWeather,
    pub inserted_at: DateTime<Utc>,
}
