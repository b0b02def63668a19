//! Table declarations for the `items` and `users` entities.
//!
//! Tables are created on startup when absent; there is no versioned
//! migration history.

use sqlx::SqlitePool;
use tracing::{error, info};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub table: &'static str,
    pub statements: &'static [&'static str],
}

pub const ITEMS: EntitySchema = EntitySchema {
    table: "items",
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT,
            price INTEGER,
            car VARCHAR(100)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_items_car ON items(car)",
    ],
};

pub const USERS: EntitySchema = EntitySchema {
    table: "users",
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username VARCHAR(50) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)",
    ],
};

pub fn entities() -> [EntitySchema; 2] {
    [ITEMS, USERS]
}

/// Creates every declared table in a single transaction.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(AppError::from)?;

    for entity in entities() {
        info!("Ensuring table {} exists", entity.table);
        for statement in entity.statements {
            sqlx::query(*statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Failed to create table {}: {}", entity.table, e);
                    AppError::from(e)
                })?;
        }
    }

    tx.commit().await.map_err(AppError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::get_database_pool;
    use sqlx::Row;

    #[tokio::test]
    async fn test_init_schema_creates_tables() {
        let pool = get_database_pool(&DatabaseConfig::in_memory()).await.unwrap();

        init_schema(&pool).await.unwrap();

        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM sqlite_master WHERE type='table' AND name IN ('items', 'users')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let table_count: i64 = row.try_get("count").unwrap();
        assert_eq!(table_count, 2);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = get_database_pool(&DatabaseConfig::in_memory()).await.unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM sqlite_master WHERE type='index' AND name = 'idx_users_username'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let index_count: i64 = row.try_get("count").unwrap();
        assert_eq!(index_count, 1);
    }
}
