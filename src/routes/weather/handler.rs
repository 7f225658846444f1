use axum::extract::{Json, Query, State, rejection::QueryRejection};
use chrono::Utc;

use crate::{
    AppState,
    cache::{CachedWeather, keys::time_bucket},
    error::AppError,
    weather::compute_metrics,
};

use super::model::{WeatherQuery, WeatherResponse};

#[axum::debug_handler]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("City parameter is required".into()))?;

    let req_count = state.counter.increment();
    let bucket = time_bucket(Utc::now(), state.config.cache_bucket());

    if let Some(payload) = state.weather_cache.get(city, bucket) {
        tracing::debug!("Weather cache hit for {} (bucket {})", city, bucket);
        return Ok(Json(WeatherResponse::from_cached(payload, req_count, true)));
    }

    let batch = state
        .weather_source
        .sample(city)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Weather data not available for city: {}", city)))?;

    let metrics = compute_metrics(&batch.temperatures(), &batch.humidities(), batch.utc_offset);
    let payload = CachedWeather {
        city: city.to_string(),
        metrics,
        timezone: batch.timezone,
    };

    state.weather_cache.put(city, bucket, payload.clone());
    tracing::info!(
        "Computed weather for {} from {} readings via {}",
        city,
        batch.readings.len(),
        state.weather_source.name()
    );

    Ok(Json(WeatherResponse::from_cached(payload, req_count, false)))
}
