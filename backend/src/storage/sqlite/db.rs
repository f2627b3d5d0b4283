use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::storage::traits::KeyValueStorage;

/// Key/value storage backed by a single `key_values` SQLite table
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Connect to `url`, creating the database and its table on first use
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open the database file at `path`, creating parent directories as needed
    pub async fn open_file(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Self::new(&format!("sqlite:{}", path.display())).await
    }

    /// Private in-memory database that lives as long as the connection
    pub async fn init_in_memory() -> Result<Self> {
        // A single long-lived connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// `key_values(key, value)`; one row per storage key
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStorage for DbConnection {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => {
                debug!("No value stored under key '{}'", key);
                Ok(None)
            }
        }
    }

    /// This will overwrite any existing value for the same key.
    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO key_values (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        debug!("Stored {} bytes under key '{}'", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_returns_none() {
        let db = DbConnection::init_in_memory().await.unwrap();
        assert_eq!(db.get_value("expenses").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let db = DbConnection::init_in_memory().await.unwrap();
        db.put_value("expenses", "[]").await.unwrap();
        assert_eq!(db.get_value("expenses").await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_value() {
        let db = DbConnection::init_in_memory().await.unwrap();
        db.put_value("expenses", "first").await.unwrap();
        db.put_value("expenses", "second").await.unwrap();
        assert_eq!(db.get_value("expenses").await.unwrap(), Some("second".to_string()));

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM key_values")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("n");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("expenses.db");

        let db = DbConnection::open_file(&path).await.unwrap();
        db.put_value("expenses", "[1]").await.unwrap();
        db.pool().close().await;

        let reopened = DbConnection::open_file(&path).await.unwrap();
        assert_eq!(reopened.get_value("expenses").await.unwrap(), Some("[1]".to_string()));
    }
}
