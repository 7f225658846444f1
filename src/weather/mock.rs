use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use rand::Rng;

use super::source::{ReadingBatch, WeatherError, WeatherReading, WeatherSource};

const SAMPLES_PER_REQUEST: usize = 5;
const TEMP_JITTER: f64 = 3.0;
const HUMIDITY_JITTER: f64 = 10.0;

struct CityBaseline {
    name: &'static str,
    temp: f64,
    humidity: f64,
    timezone: Tz,
}

const CITIES: &[CityBaseline] = &[
    CityBaseline { name: "london", temp: 15.5, humidity: 70.0, timezone: chrono_tz::Europe::London },
    CityBaseline { name: "paris", temp: 18.2, humidity: 65.0, timezone: chrono_tz::Europe::Paris },
    CityBaseline { name: "new york", temp: 22.1, humidity: 60.0, timezone: chrono_tz::America::New_York },
    CityBaseline { name: "tokyo", temp: 25.3, humidity: 75.0, timezone: chrono_tz::Asia::Tokyo },
    CityBaseline { name: "berlin", temp: 12.8, humidity: 68.0, timezone: chrono_tz::Europe::Berlin },
    CityBaseline { name: "madrid", temp: 28.4, humidity: 45.0, timezone: chrono_tz::Europe::Madrid },
    CityBaseline { name: "rome", temp: 24.7, humidity: 55.0, timezone: chrono_tz::Europe::Rome },
    CityBaseline { name: "moscow", temp: 8.3, humidity: 80.0, timezone: chrono_tz::Europe::Moscow },
    CityBaseline { name: "sydney", temp: 21.6, humidity: 62.0, timezone: chrono_tz::Australia::Sydney },
    CityBaseline { name: "toronto", temp: 16.9, humidity: 72.0, timezone: chrono_tz::America::Toronto },
];

/// 内置城市表，每次请求在基准值附近随机抖动生成采样
#[derive(Debug, Default, Clone)]
pub struct MockWeatherSource;

impl MockWeatherSource {
    pub fn new() -> Self {
        Self
    }

    fn lookup(city: &str) -> Option<&'static CityBaseline> {
        let key = city.trim().to_lowercase();
        CITIES.iter().find(|c| c.name == key)
    }
}

/// 给定时刻该时区的实际偏移（含夏令时）
fn offset_at(tz: Tz, now: DateTime<Utc>) -> FixedOffset {
    now.with_timezone(&tz).offset().fix()
}

#[async_trait]
impl WeatherSource for MockWeatherSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn sample(&self, city: &str) -> Result<Option<ReadingBatch>, WeatherError> {
        let Some(baseline) = Self::lookup(city) else {
            return Ok(None);
        };

        let readings = {
            let mut rng = rand::thread_rng();
            (0..SAMPLES_PER_REQUEST)
                .map(|_| WeatherReading {
                    temperature: baseline.temp + rng.gen_range(-TEMP_JITTER..=TEMP_JITTER),
                    humidity: baseline.humidity
                        + rng.gen_range(-HUMIDITY_JITTER..=HUMIDITY_JITTER),
                })
                .collect()
        };

        Ok(Some(ReadingBatch {
            readings,
            timezone: baseline.timezone.name().to_string(),
            utc_offset: offset_at(baseline.timezone, Utc::now()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::compute_metrics_at;
    use chrono::TimeZone;

    #[tokio::test]
    async fn samples_known_city_within_jitter() {
        let source = MockWeatherSource::new();
        let batch = source.sample("  Tokyo ").await.unwrap().unwrap();

        assert_eq!(batch.timezone, "Asia/Tokyo");
        assert_eq!(batch.utc_offset.local_minus_utc(), 9 * 3600);
        assert_eq!(batch.readings.len(), SAMPLES_PER_REQUEST);
        for reading in &batch.readings {
            assert!((reading.temperature - 25.3).abs() <= TEMP_JITTER + 1e-9);
            assert!((reading.humidity - 75.0).abs() <= HUMIDITY_JITTER + 1e-9);
        }
    }

    #[tokio::test]
    async fn unknown_city_is_none() {
        let source = MockWeatherSource::new();
        assert!(source.sample("atlantis").await.unwrap().is_none());
    }

    #[test]
    fn city_table_has_ten_entries() {
        assert_eq!(CITIES.len(), 10);
        assert!(MockWeatherSource::lookup("New York").is_some());
    }

    #[test]
    fn offset_follows_daylight_saving() {
        let summer = Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap();

        assert_eq!(offset_at(chrono_tz::Europe::London, summer).local_minus_utc(), 3600);
        assert_eq!(offset_at(chrono_tz::Europe::London, winter).local_minus_utc(), 0);
        assert_eq!(
            offset_at(chrono_tz::America::New_York, summer).local_minus_utc(),
            -4 * 3600
        );
        assert_eq!(
            offset_at(chrono_tz::Australia::Sydney, summer).local_minus_utc(),
            10 * 3600
        );
        assert_eq!(
            offset_at(chrono_tz::Australia::Sydney, winter).local_minus_utc(),
            11 * 3600
        );
    }

    #[test]
    fn london_summer_evening_uses_off_hours_factor() {
        // 17:30 UTC 在夏季的伦敦是 18:30
        let summer = Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap();
        let offset = offset_at(chrono_tz::Europe::London, summer);
        let metrics = compute_metrics_at(&[20.0], &[0.0], offset, summer);
        assert_eq!(metrics.comfort_score, 16.0);

        // 冬季同一 UTC 时刻是当地 17:30，仍在白天区间
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap();
        let offset = offset_at(chrono_tz::Europe::London, winter);
        let metrics = compute_metrics_at(&[20.0], &[0.0], offset, winter);
        assert_eq!(metrics.comfort_score, 20.0);
    }
}
