use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

use cache::{SessionStore, WeatherCache};
use config::Config;
use metrics::RequestCounter;
use weather::WeatherSource;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod weather;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub counter: Arc<RequestCounter>,
    pub weather_cache: Arc<WeatherCache>,
    pub sessions: Arc<SessionStore>,
    pub weather_source: Arc<dyn WeatherSource>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config, weather_source: Arc<dyn WeatherSource>) -> Self {
        let weather_cache = WeatherCache::new(config.cache_retention(), config.cache_max_entries);
        let sessions = SessionStore::new(config.session_ttl());

        Self {
            pool,
            config,
            counter: Arc::new(RequestCounter::new()),
            weather_cache: Arc::new(weather_cache),
            sessions: Arc::new(sessions),
            weather_source,
        }
    }
}

/// 组装全部路由：公开路由直接挂载，受保护路由前置认证中间件
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::system::health))
        .route("/weather", get(routes::weather::get_weather))
        .route("/users", get(routes::user::list_users))
        .route("/login", post(routes::user::login));

    let protected_routes = Router::new()
        .route("/config", get(routes::system::get_config))
        .route("/db-stats", get(routes::system::db_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest(
            &state.config.api_base_uri,
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_errors))
                .layer(TimeoutLayer::new(state.config.request_timeout())),
        )
        .with_state(state)
}

/// 后台定期清理过期会话和缓存
pub fn spawn_sweeper(state: &AppState) -> JoinHandle<()> {
    let sessions = Arc::clone(&state.sessions);
    let weather_cache = Arc::clone(&state.weather_cache);
    let period = state.config.sweep_interval();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let expired_sessions = sessions.sweep();
            let expired_entries = weather_cache.sweep();
            if expired_sessions > 0 || expired_entries > 0 {
                tracing::debug!(
                    "Swept {} sessions and {} cache entries",
                    expired_sessions,
                    expired_entries
                );
            }
        }
    })
}
