use async_trait::async_trait;
use chrono::FixedOffset;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::source::{ReadingBatch, WeatherError, WeatherReading, WeatherSource};

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainBlock,
    /// 相对 UTC 的偏移秒数
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

/// OpenWeatherMap 兼容的当前天气接口
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherSource {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn sample(&self, city: &str) -> Result<Option<ReadingBatch>, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Weather provider does not know city {:?}", city);
            return Ok(None);
        }

        let body: CurrentWeather = response.error_for_status()?.json().await?;

        let utc_offset = FixedOffset::east_opt(body.timezone).ok_or_else(|| {
            WeatherError::UnexpectedResponse(format!("timezone offset {} out of range", body.timezone))
        })?;

        Ok(Some(ReadingBatch {
            readings: vec![WeatherReading {
                temperature: body.main.temp,
                humidity: body.main.humidity,
            }],
            timezone: format!("UTC{}", utc_offset),
            utc_offset,
        }))
    }
}
