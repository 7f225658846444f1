use chrono::{DateTime, Utc};
use std::time::Duration;

/// 天气缓存键前缀
const WEATHER_PREFIX: &str = "weather:";

/// 将时间截断到固定区间，同一区间内的请求共用一个桶
pub fn time_bucket(now: DateTime<Utc>, interval: Duration) -> i64 {
    let secs = interval.as_secs().max(1) as i64;
    now.timestamp().div_euclid(secs)
}

/// 生成天气缓存键，城市名忽略大小写和首尾空白
pub fn weather_key(city: &str, bucket: i64) -> String {
    format!("{}{}:{}", WEATHER_PREFIX, city.trim().to_lowercase(), bucket)
}
