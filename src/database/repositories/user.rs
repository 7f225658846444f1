use sqlx::SqlitePool;

use crate::database::models::user::{UserCredentials, UserSummary};

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// 分页参数，构造时完成校验
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err("page must be at least 1".into());
        }
        if limit < 1 {
            return Err("limit must be at least 1".into());
        }

        let limit = limit.min(MAX_PAGE_SIZE);
        if (page - 1).checked_mul(limit).is_none() {
            return Err("page is out of range".into());
        }

        Ok(Self { page, limit })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// 把用户输入中的 LIKE 通配符转义为普通字符
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    /// 按用户名模糊查询并分页，过滤和分页都在 SQL 中完成
    pub async fn find_users(
        pool: &SqlitePool,
        username_filter: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let users = match username_filter.filter(|f| !f.is_empty()) {
            Some(filter) => {
                sqlx::query_as::<_, UserSummary>(
                    r#"
                    SELECT id, username, email
                    FROM users
                    WHERE username LIKE ? ESCAPE '\'
                    ORDER BY id
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(like_pattern(filter))
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserSummary>(
                    r#"
                    SELECT id, username, email
                    FROM users
                    ORDER BY id
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&mut *conn)
                .await?
            }
        };

        Ok(users)
    }

    /// 按用户名精确查找凭据
    pub async fn find_credentials(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let user = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ensure_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool, names: &[&str]) {
        for name in names {
            let email = format!("{}@example.com", name);
            sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
                .bind(name)
                .bind(&email)
                .bind("x")
                .execute(pool)
                .await
                .unwrap();
        }
    }

    #[test]
    fn pagination_defaults_and_bounds() {
        let p = Pagination::new(None, None).unwrap();
        assert_eq!((p.limit(), p.offset()), (50, 0));

        let p = Pagination::new(Some(3), Some(10)).unwrap();
        assert_eq!((p.limit(), p.offset()), (10, 20));

        assert_eq!(Pagination::new(Some(1), Some(5000)).unwrap().limit(), MAX_PAGE_SIZE);
        assert!(Pagination::new(Some(0), Some(10)).is_err());
        assert!(Pagination::new(Some(1), Some(0)).is_err());
        assert!(Pagination::new(Some(i64::MAX), Some(100)).is_err());
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("a%b_c\\"), "%a\\%b\\_c\\\\%");
    }

    #[tokio::test]
    async fn second_page_returns_at_most_limit_rows() {
        let pool = memory_pool().await;
        let names: Vec<String> = (1..=25).map(|i| format!("alice{:02}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed(&pool, &refs).await;
        seed(&pool, &["bob", "carol"]).await;

        let page = Pagination::new(Some(2), Some(10)).unwrap();
        let users = UserRepository::find_users(&pool, Some("ali"), page).await.unwrap();
        assert_eq!(users.len(), 10);
        assert_eq!(users[0].username, "alice11");
        assert_eq!(users[9].username, "alice20");

        let page = Pagination::new(Some(3), Some(10)).unwrap();
        let users = UserRepository::find_users(&pool, Some("ALI"), page).await.unwrap();
        assert_eq!(users.len(), 5);

        let page = Pagination::new(Some(1), Some(100)).unwrap();
        let all = UserRepository::find_users(&pool, None, page).await.unwrap();
        assert_eq!(all.len(), 27);
    }

    #[tokio::test]
    async fn wildcards_in_filter_match_literally() {
        let pool = memory_pool().await;
        seed(&pool, &["bob", "b_b", "100%real"]).await;

        let page = Pagination::new(None, None).unwrap();
        let underscore = UserRepository::find_users(&pool, Some("_"), page).await.unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].username, "b_b");

        let percent = UserRepository::find_users(&pool, Some("%"), page).await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].username, "100%real");
    }

    #[tokio::test]
    async fn credential_lookup_is_exact_and_injection_safe() {
        let pool = memory_pool().await;
        seed(&pool, &["admin", "alice"]).await;

        let found = UserRepository::find_credentials(&pool, "alice").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));

        for hostile in ["' OR '1'='1", "admin' --", "alice'; DROP TABLE users; --", "%"] {
            assert!(
                UserRepository::find_credentials(&pool, hostile)
                    .await
                    .unwrap()
                    .is_none(),
                "{} matched a row",
                hostile
            );
        }

        // 表仍然完好
        let page = Pagination::new(None, None).unwrap();
        assert_eq!(UserRepository::find_users(&pool, None, page).await.unwrap().len(), 2);
    }
}
