use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::cache::models::session::SessionRecord;

/// 会话存储
///
/// 会话在创建 `ttl` 之后失效。校验时发现的过期会话当场删除，
/// 其余的由后台清理任务调用 [`SessionStore::sweep`] 回收。
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
    ttl: TimeDelta,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// 创建会话，返回不透明的会话ID
    pub fn create(&self, user_id: i64, username: &str) -> String {
        self.create_at(user_id, username, Utc::now())
    }

    pub fn create_at(&self, user_id: i64, username: &str, now: DateTime<Utc>) -> String {
        let session_id = Uuid::new_v4().to_string();
        let record = SessionRecord {
            session_id: session_id.clone(),
            user_id,
            username: username.to_string(),
            created_at: now,
        };

        self.sessions.lock().insert(session_id.clone(), record);
        tracing::debug!("Created session for user {}", user_id);
        session_id
    }

    /// 校验会话，不存在或已过期返回 None
    pub fn validate(&self, session_id: &str) -> Option<SessionRecord> {
        self.validate_at(session_id, Utc::now())
    }

    pub fn validate_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<SessionRecord> {
        let mut sessions = self.sessions.lock();
        let expired = match sessions.get(session_id) {
            Some(record) if self.is_live(record, now) => return Some(record.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            sessions.remove(session_id);
            tracing::debug!("Session expired on validation");
        }
        None
    }

    /// 删除会话，返回会话此前是否存在
    pub fn expire(&self, session_id: &str) -> bool {
        self.sessions.lock().remove(session_id).is_some()
    }

    /// 清理所有过期会话，返回清理数量
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, record| self.is_live(record, now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.created_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn created_session_validates() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let id = store.create(7, "alice");

        let record = store.validate(&id).unwrap();
        assert_eq!(record.session_id, id);
        assert_eq!(record.user_id, 7);
        assert_eq!(record.username, "alice");
    }

    #[test]
    fn unknown_session_is_rejected() {
        let store = SessionStore::new(Duration::from_secs(3600));
        store.create(7, "alice");
        assert!(store.validate("sess_1_1234").is_none());
        assert!(store.validate("").is_none());
    }

    #[test]
    fn session_expires_after_ttl() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create_at(1, "bob", t0());

        assert!(store.validate_at(&id, t0() + TimeDelta::seconds(59)).is_some());
        assert!(store.validate_at(&id, t0() + TimeDelta::seconds(60)).is_none());
        // 过期的会话在校验时被删除
        assert!(store.is_empty());
        assert!(store.validate_at(&id, t0()).is_none());
    }

    #[test]
    fn expire_invalidates() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(1, "bob");
        assert!(store.expire(&id));
        assert!(!store.expire(&id));
        assert!(store.validate(&id).is_none());
    }

    #[test]
    fn sweep_removes_only_expired() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.create_at(1, "old", t0());
        let fresh = store.create_at(2, "fresh", t0() + TimeDelta::seconds(50));

        assert_eq!(store.sweep_at(t0() + TimeDelta::seconds(70)), 1);
        assert_eq!(store.len(), 1);
        assert!(store.validate_at(&fresh, t0() + TimeDelta::seconds(70)).is_some());
    }

    #[test]
    fn concurrent_creates_yield_unique_ids() {
        let store = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| store.create(i, "user"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 800);
        assert_eq!(store.len(), 800);
    }
}
