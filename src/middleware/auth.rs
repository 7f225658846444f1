use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    cache::{SessionRecord, SessionStore},
    config::Config,
    error::AppError,
    utils::verify_token,
};

/// 携带会话ID的请求头
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    Authorized(SessionRecord),
    Unauthorized(&'static str),
}

/// 校验请求身份
///
/// 必须同时满足：Bearer 令牌签名有效且未过期；会话ID能在会话存储中解析到有效会话；
/// 令牌绑定的会话和用户与该会话一致。缺少任一项都拒绝。
pub fn authorize(headers: &HeaderMap, sessions: &SessionStore, config: &Config) -> AuthDecision {
    let Some(bearer) = headers.typed_get::<Authorization<Bearer>>() else {
        return AuthDecision::Unauthorized("missing bearer credential");
    };

    let claims = match verify_token(bearer.token(), config) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Bearer token rejected: {}", e);
            return AuthDecision::Unauthorized("invalid bearer credential");
        }
    };

    let Some(session_id) = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return AuthDecision::Unauthorized("missing session id");
    };

    if claims.sid != session_id {
        return AuthDecision::Unauthorized("credential not bound to session");
    }

    let Some(record) = sessions.validate(session_id) else {
        return AuthDecision::Unauthorized("invalid or expired session");
    };

    if claims.sub != record.user_id.to_string() {
        return AuthDecision::Unauthorized("credential not bound to session");
    }

    AuthDecision::Authorized(record)
}

/// 受保护路由的前置中间件，通过后把会话放入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match authorize(request.headers(), &state.sessions, &state.config) {
        AuthDecision::Authorized(record) => {
            request.extensions_mut().insert(record);
            Ok(next.run(request).await)
        }
        AuthDecision::Unauthorized(reason) => {
            tracing::info!("Rejected {} {}: {}", request.method(), request.uri().path(), reason);
            Err(AppError::Auth("Authentication required".into()))
        }
    }
}
