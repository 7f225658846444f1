use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 天气数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSourceKind {
    Mock,
    OpenWeather,
}

impl WeatherSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSourceKind::Mock => "mock",
            WeatherSourceKind::OpenWeather => "openweather",
        }
    }
}

impl FromStr for WeatherSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(WeatherSourceKind::Mock),
            "openweather" => Ok(WeatherSourceKind::OpenWeather),
            other => Err(format!("unknown weather source: {}", other)),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub request_timeout_secs: u64,
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
    pub cache_bucket_secs: u64,
    pub cache_retention_secs: u64,
    pub cache_max_entries: usize,
    pub sweep_interval_secs: u64,
    pub weather_source: WeatherSourceKind,
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    pub weather_api_timeout_secs: u64,
}

impl Config {
    /// 使用默认值构建配置，仅签名密钥必须由调用方提供
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Config {
            database_url: "sqlite://app.db".into(),
            db_max_connections: 5,
            db_timeout_secs: 5,
            server_host: "0.0.0.0".into(),
            server_port: 5000,
            api_base_uri: "/api".into(),
            request_timeout_secs: 30,
            jwt_secret: jwt_secret.into(),
            session_ttl_secs: 3600,
            cache_bucket_secs: 60,
            cache_retention_secs: 600,
            cache_max_entries: 1024,
            sweep_interval_secs: 60,
            weather_source: WeatherSourceKind::Mock,
            weather_api_url: "http://api.openweathermap.org/data/2.5/weather".into(),
            weather_api_key: None,
            weather_api_timeout_secs: 10,
        }
    }

    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let defaults = Config::new(env::var("JWT_SECRET")?);

        Ok(Config {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_timeout_secs: parse_or("DB_TIMEOUT_SECS", defaults.db_timeout_secs),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", defaults.server_port),
            api_base_uri: env::var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            jwt_secret: defaults.jwt_secret,
            session_ttl_secs: parse_or("SESSION_TTL_SECS", defaults.session_ttl_secs),
            cache_bucket_secs: parse_or("CACHE_BUCKET_SECS", defaults.cache_bucket_secs).max(1),
            cache_retention_secs: parse_or("CACHE_RETENTION_SECS", defaults.cache_retention_secs),
            cache_max_entries: parse_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries).max(1),
            sweep_interval_secs: parse_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)
                .max(1),
            weather_source: parse_or("WEATHER_SOURCE", defaults.weather_source),
            weather_api_url: env::var("EXTERNAL_WEATHER_API_URL")
                .unwrap_or(defaults.weather_api_url),
            weather_api_key: env::var("API_KEY_WEATHER").ok().filter(|k| !k.is_empty()),
            weather_api_timeout_secs: parse_or(
                "WEATHER_API_TIMEOUT_SECS",
                defaults.weather_api_timeout_secs,
            ),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cache_bucket(&self) -> Duration {
        Duration::from_secs(self.cache_bucket_secs)
    }

    pub fn cache_retention(&self) -> Duration {
        Duration::from_secs(self.cache_retention_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn weather_api_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_api_timeout_secs)
    }
}

// 变量缺失时静默使用默认值，格式错误时告警后使用默认值
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
