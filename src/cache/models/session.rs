use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 登录会话
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
