use sqlx::SqlitePool;

/// 数据库统计
pub struct StatsRepository;

impl StatsRepository {
    /// 用户总数
    ///
    /// 连接在函数返回时归还连接池，出错路径也一样。
    pub async fn count_users(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;

        Ok(total)
    }
}
