use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub username: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub user_id: i64,
    pub session_id: String,
    pub token: String,
    pub expires_at: i64,
}
