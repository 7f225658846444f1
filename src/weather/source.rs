use async_trait::async_trait;
use chrono::FixedOffset;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// 单次采样，仅作为计算输入，不落库
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub humidity: f64,
}

/// 某城市的一批采样及其所在时区
#[derive(Debug, Clone)]
pub struct ReadingBatch {
    pub readings: Vec<WeatherReading>,
    pub timezone: String,
    pub utc_offset: FixedOffset,
}

impl ReadingBatch {
    pub fn temperatures(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.temperature).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.humidity).collect()
    }
}

/// 天气数据来源
///
/// 城市未知时返回 `Ok(None)`，上游故障时返回错误。
#[async_trait]
pub trait WeatherSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn sample(&self, city: &str) -> Result<Option<ReadingBatch>, WeatherError>;
}
