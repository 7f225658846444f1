// 天气模块
// 包含统计计算和可替换的数据来源

pub mod metrics;
pub mod mock;
pub mod openweather;
pub mod source;

use std::sync::Arc;

use crate::config::{Config, WeatherSourceKind};

pub use metrics::{WeatherMetrics, compute_metrics, compute_metrics_at};
pub use mock::MockWeatherSource;
pub use openweather::OpenWeatherSource;
pub use source::{ReadingBatch, WeatherError, WeatherReading, WeatherSource};

/// 根据配置选择数据来源
pub fn source_from_config(config: &Config) -> Result<Arc<dyn WeatherSource>, WeatherError> {
    match config.weather_source {
        WeatherSourceKind::Mock => Ok(Arc::new(MockWeatherSource::new())),
        WeatherSourceKind::OpenWeather => {
            let api_key = config.weather_api_key.clone().ok_or_else(|| {
                WeatherError::Config("API_KEY_WEATHER is required for the openweather source".into())
            })?;
            Ok(Arc::new(OpenWeatherSource::new(
                config.weather_api_url.clone(),
                api_key,
                config.weather_api_timeout(),
            )?))
        }
    }
}
