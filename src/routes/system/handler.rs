use axum::extract::{Extension, Json, State};
use chrono::Utc;

use crate::{AppState, cache::SessionRecord, database::StatsRepository, error::AppError};

use super::model::{CacheStatus, ConfigResponse, DbStatsResponse, HealthResponse, SERVICE_NAME};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
        timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
    })
}

#[axum::debug_handler]
pub async fn get_config(
    State(state): State<AppState>,
    Extension(session): Extension<SessionRecord>,
) -> Json<ConfigResponse> {
    tracing::debug!("Config requested by user {}", session.user_id);

    Json(ConfigResponse {
        service_name: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        weather_source: state.weather_source.name().into(),
        active_sessions: state.sessions.len(),
        cache_size: state.weather_cache.len(),
        request_count: state.counter.current(),
    })
}

#[axum::debug_handler]
pub async fn db_stats(State(state): State<AppState>) -> Result<Json<DbStatsResponse>, AppError> {
    let total_users = StatsRepository::count_users(&state.pool).await?;

    Ok(Json(DbStatsResponse {
        total_users,
        request_count: state.counter.current(),
        cache_status: CacheStatus {
            weather_cache_size: state.weather_cache.len(),
            session_count: state.sessions.len(),
        },
    }))
}
