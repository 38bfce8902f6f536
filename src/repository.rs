//! Persistence for items.
//!
//! Handlers only see the [`ItemRepository`] trait; [`SqliteItemRepository`] is
//! built once at startup around the shared pool and injected via `AppState`.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::error::{validation, AppResult, OptionExt};
use crate::types::Item;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts a new item and returns its id.
    async fn insert(&self, name: &str, category: &str, image: Option<&str>) -> AppResult<i64>;

    /// All items in insertion order.
    async fn list_all(&self) -> AppResult<Vec<Item>>;

    /// The item with `id`, or `AppError::NotFound`.
    async fn get_by_id(&self, id: i64) -> AppResult<Item>;

    /// Items whose name matches `%keyword%` under SQL `LIKE`. Results carry name and category only.
    async fn search_by_name(&self, keyword: &str) -> AppResult<Vec<Item>>;

    /// Connectivity check for `/readyz`.
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn item_from_row(row: &SqliteRow) -> Item {
    Item {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        image: row.get("image"),
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn insert(&self, name: &str, category: &str, image: Option<&str>) -> AppResult<i64> {
        validation::validate_required(name, "name")?;
        validation::validate_required(category, "category")?;

        let result = sqlx::query("INSERT INTO items (name, category, image) VALUES (?1, ?2, ?3)")
            .bind(name)
            .bind(category)
            .bind(image)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_all(&self) -> AppResult<Vec<Item>> {
        let rows = sqlx::query("SELECT id, name, category, image FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(item_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        let row = sqlx::query("SELECT id, name, category, image FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(item_from_row).ok_or_not_found(&format!("Item {}", id))
    }

    async fn search_by_name(&self, keyword: &str) -> AppResult<Vec<Item>> {
        // The keyword goes into the pattern as-is, so `%` and `_` keep their LIKE meaning
        let pattern = format!("%{}%", keyword);
        let rows = sqlx::query("SELECT id, name, category FROM items WHERE name LIKE ?1 ORDER BY id")
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| Item {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                image: None,
            })
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
