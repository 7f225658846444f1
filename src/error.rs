use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::utils::error_codes;
use crate::weather::WeatherError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 依赖故障：数据库
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 依赖故障：天气数据来源
    #[error("Weather source error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Weather(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 依赖和内部错误只记录日志，客户端只看到通用信息
        let (code, error_message) = match self {
            AppError::Validation(msg) => (error_codes::VALIDATION_ERROR, msg),
            AppError::Auth(msg) => (error_codes::AUTH_FAILED, msg),
            AppError::NotFound(msg) => (error_codes::NOT_FOUND, msg),
            AppError::Database(e) => {
                tracing::error!("Database operation failed: {}", e);
                (
                    error_codes::DEPENDENCY_ERROR,
                    "Database operation failed".to_string(),
                )
            }
            AppError::Weather(e) => {
                tracing::error!("Weather source failed: {}", e);
                (
                    error_codes::DEPENDENCY_ERROR,
                    "Weather service unavailable".to_string(),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code,
            error_message,
        });

        (status, body).into_response()
    }
}
