// 数据库模块
// 包含连接池、实体定义和存储库操作

pub mod models; // 数据库实体定义
pub mod repositories; // 存储库实现

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;

// 重新导出常用类型和函数，方便其他模块使用
pub use models::user::{UserCredentials, UserSummary};
pub use repositories::stats::StatsRepository;
pub use repositories::user::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination, UserRepository};

/// 建立连接池，获取连接有超时上限
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .busy_timeout(config.db_timeout());

    SqlitePoolOptions::new()
        .max_connections(config.db_max_connections.max(1))
        .acquire_timeout(config.db_timeout())
        .connect_with(options)
        .await
}

/// 确保 users 表存在
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
