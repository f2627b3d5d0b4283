//! Fixtures shared by the unit tests: a throwaway data directory, sample
//! records and storage doubles that fail on purpose.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::domain::expense_service::ExpenseService;
use crate::domain::models::expense::iso_date;
use crate::domain::models::{Category, ExpenseRecord};
use crate::storage::{ExpenseRepository, FileConnection, KeyValueStorage, DEFAULT_STORAGE_KEY};

/// Data directory removed when the environment is dropped
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: FileConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = FileConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Expense service backed by this environment's data directory
    pub fn file_service(&self) -> ExpenseService {
        let repository =
            ExpenseRepository::new(Arc::new(self.connection.clone()), DEFAULT_STORAGE_KEY);
        ExpenseService::new(repository, "Rs.")
    }
}

/// Build a valid expense with a fresh id. `date` is `YYYY-MM-DD` or RFC 3339.
pub fn sample_expense(title: &str, amount: f64, category: Category, date: &str) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseRecord::generate_id(0),
        title: title.to_string(),
        amount,
        category,
        date: iso_date::parse(date).expect("test dates must parse"),
        image_uri: None,
    }
}

/// Storage whose every operation fails, for exercising error paths
pub struct FailingStorage;

#[async_trait]
impl KeyValueStorage for FailingStorage {
    async fn get_value(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("disk unavailable"))
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

/// Storage that reads normally but refuses every write
pub struct ReadOnlyStorage<S> {
    pub inner: S,
}

#[async_trait]
impl<S: KeyValueStorage> KeyValueStorage for ReadOnlyStorage<S> {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_value(key).await
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage is read-only"))
    }
}
