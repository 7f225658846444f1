use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// 舒适度按当地时间计算，白天区间内不打折
const DAYTIME_HOURS: std::ops::RangeInclusive<u32> = 9..=17;
const DAYTIME_FACTOR: f64 = 1.0;
const OFF_HOURS_FACTOR: f64 = 0.8;

/// 天气统计结果，各字段已保留两位小数
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherMetrics {
    pub avg_temp: f64,
    pub heat_index: f64,
    pub comfort_score: f64,
}

/// 以当前时间计算一组读数的统计值
///
/// `location_offset` 是目标城市相对 UTC 的偏移，用于确定当地小时，
/// 与服务器所在时区无关。
pub fn compute_metrics(
    temps: &[f64],
    humidities: &[f64],
    location_offset: FixedOffset,
) -> WeatherMetrics {
    compute_metrics_at(temps, humidities, location_offset, Utc::now())
}

pub fn compute_metrics_at(
    temps: &[f64],
    humidities: &[f64],
    location_offset: FixedOffset,
    now: DateTime<Utc>,
) -> WeatherMetrics {
    if temps.is_empty() {
        return WeatherMetrics::default();
    }

    let avg_temp = mean(temps);
    let avg_humidity = mean(humidities);

    let heat_index = avg_temp + 0.1 * avg_humidity + 0.001 * avg_temp * avg_humidity;

    let local_hour = now.with_timezone(&location_offset).hour();
    let time_factor = if DAYTIME_HOURS.contains(&local_hour) {
        DAYTIME_FACTOR
    } else {
        OFF_HOURS_FACTOR
    };
    let comfort_score = avg_temp * time_factor / (1.0 + avg_humidity / 100.0);

    WeatherMetrics {
        avg_temp: round2(avg_temp),
        heat_index: round2(heat_index),
        comfort_score: round2(comfort_score),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
