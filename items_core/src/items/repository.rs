use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::database::{connection::begin, DbItem};
use crate::error::{AppError, Result};
use crate::items::ItemFilter;

const ITEM_COLUMNS: &str = "id, name, description, price, car";

#[async_trait]
pub trait ItemRepositoryTrait {
    /// Inserts a record whose id is chosen by the caller.
    async fn create(&self, item: DbItem) -> Result<DbItem>;
    async fn get(&self, id: i64) -> Result<DbItem>;
    async fn list_all(&self) -> Result<Vec<DbItem>>;
    /// Overwrites every mutable column of an existing record.
    async fn update(&self, item: DbItem) -> Result<DbItem>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn filter(&self, filter: &ItemFilter) -> Result<Vec<DbItem>>;
}

/// Every operation runs in its own transaction, rolled back if it fails.
#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i64) -> AppError {
    debug!("Item {} not found", id);
    AppError::NotFound("Item not found".to_string())
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn create(&self, item: DbItem) -> Result<DbItem> {
        let mut tx = begin(&self.pool).await?;

        // The primary key rejects duplicates, so concurrent creates of the
        // same id cannot both succeed.
        let created = sqlx::query_as::<_, DbItem>(&format!(
            "INSERT INTO items ({ITEM_COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.car)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Item already exists".to_string()),
            other => other,
        })?;

        tx.commit().await?;

        info!("Created item {}", created.id);
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<DbItem> {
        let mut tx = begin(&self.pool).await?;

        let item = sqlx::query_as::<_, DbItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        item.ok_or_else(|| not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<DbItem>> {
        let mut tx = begin(&self.pool).await?;

        let items = sqlx::query_as::<_, DbItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(items)
    }

    async fn update(&self, item: DbItem) -> Result<DbItem> {
        let mut tx = begin(&self.pool).await?;

        let updated = sqlx::query_as::<_, DbItem>(&format!(
            "UPDATE items SET name = ?, description = ?, price = ?, car = ? WHERE id = ? RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.car)
        .bind(item.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(item.id))?;

        tx.commit().await?;

        info!("Updated item {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = begin(&self.pool).await?;

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await?;

        info!("Deleted item {}", id);
        Ok(())
    }

    async fn filter(&self, filter: &ItemFilter) -> Result<Vec<DbItem>> {
        let mut tx = begin(&self.pool).await?;

        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE 1=1"));
        filter.push_conditions(&mut builder);
        builder.push(" ORDER BY id");
        let sql = builder.sql().to_string();

        let items = builder
            .build_query_as::<DbItem>()
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Item filter failed: query={}, error={}", sql, e);
                AppError::from(e)
            })?;

        tx.commit().await?;

        debug!("Filter {:?} matched {} items", filter, items.len());
        Ok(items)
    }
}
