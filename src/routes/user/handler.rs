use axum::extract::{
    Json, Query, State,
    rejection::{JsonRejection, QueryRejection},
};

use crate::{
    AppState,
    database::{Pagination, UserRepository, UserSummary},
    error::AppError,
    utils::{generate_token, verify_against_dummy, verify_password},
};

use super::model::{LoginRequest, LoginResponse, UserListQuery};

/// 登录失败统一返回，不区分用户不存在和密码错误
fn invalid_credentials() -> AppError {
    AppError::Auth("Invalid username or password".into())
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let pagination = Pagination::new(query.page, query.limit).map_err(AppError::Validation)?;

    let users =
        UserRepository::find_users(&state.pool, query.username.as_deref(), pagination).await?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected login payload: {}", e);
        AppError::Validation("Missing or malformed JSON payload".into())
    })?;

    let (Some(username), Some(password)) = (
        req.username.filter(|u| !u.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Username and password are required".into(),
        ));
    };

    // bcrypt 计算较重，放到阻塞线程池
    let Some(user) = UserRepository::find_credentials(&state.pool, &username).await? else {
        // 用户不存在时同样付出一次 bcrypt 校验的耗时
        tokio::task::spawn_blocking(move || verify_against_dummy(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {}", e)))?;
        tracing::info!("Login failed: unknown user");
        return Err(invalid_credentials());
    };

    let stored_hash = user.password.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("password verification task failed: {}", e)))?;

    match verified {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("Login failed for user {}: wrong password", user.id);
            return Err(invalid_credentials());
        }
        Err(e) => {
            tracing::warn!("Stored password for user {} is not a valid hash: {}", user.id, e);
            return Err(invalid_credentials());
        }
    }

    let session_id = state.sessions.create(user.id, &user.username);
    let (token, expires_at) = match generate_token(user.id, &session_id, &state.config) {
        Ok(token) => token,
        Err(e) => {
            state.sessions.expire(&session_id);
            return Err(AppError::Internal(format!("failed to sign token: {}", e)));
        }
    };

    tracing::info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        status: "ok".into(),
        message: format!("Login successful for {}", user.username),
        user_id: user.id,
        session_id,
        token,
        expires_at,
    }))
}
