use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户列表项，不含密码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// 登录校验用的凭据，只在服务端内部使用
#[derive(Debug, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    /// bcrypt 哈希
    pub password: String,
}
