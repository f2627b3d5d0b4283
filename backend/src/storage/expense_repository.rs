//! # Expense Repository
//!
//! Persists the whole expense collection as one JSON array under a single
//! key of a [`KeyValueStorage`]. There is no per-record storage: every write
//! replaces the complete collection.
//!
//! Entries whose `category` is not one of the known categories are skipped
//! when reading and carried along unchanged when the collection is written
//! back by [`ExpenseRepository::write_collection`].

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::models::{Category, ExpenseRecord};
use crate::error::ExpenseError;
use crate::storage::traits::KeyValueStorage;

/// Key under which the collection is stored unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// The decoded collection plus the raw entries that could not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCollection {
    pub records: Vec<ExpenseRecord>,
    /// Entries with an unrecognized category, in stored order
    pub unrecognized: Vec<Value>,
}

#[derive(Clone)]
pub struct ExpenseRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl ExpenseRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the usable records of the collection.
    ///
    /// A key that was never written, or holds only whitespace, reads as an
    /// empty collection. Entries with an unrecognized category are skipped.
    /// Any other payload that is not a JSON array of expense records is
    /// reported as [`ExpenseError::StorageRead`].
    pub async fn read_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        Ok(self.read_collection().await?.records)
    }

    /// Read the full collection, keeping skipped entries around.
    pub async fn read_collection(&self) -> Result<StoredCollection, ExpenseError> {
        let payload = self.storage.get_value(&self.key).await.map_err(|e| {
            error!("Failed to read key '{}': {:#}", self.key, e);
            ExpenseError::StorageRead(e.to_string())
        })?;

        let payload = match payload {
            Some(payload) if !payload.trim().is_empty() => payload,
            _ => {
                debug!("Key '{}' is empty, starting with no expenses", self.key);
                return Ok(StoredCollection::default());
            }
        };

        let entries: Vec<Value> = serde_json::from_str(&payload).map_err(|e| self.corrupt(e))?;
        let mut collection = StoredCollection::default();
        for entry in entries {
            match serde_json::from_value::<ExpenseRecord>(entry.clone()) {
                Ok(record) => collection.records.push(record),
                Err(_) if has_unrecognized_category(&entry) => {
                    warn!(
                        "Skipping stored expense with unrecognized category {} under key '{}'",
                        entry["category"], self.key
                    );
                    collection.unrecognized.push(entry);
                }
                Err(e) => return Err(self.corrupt(e)),
            }
        }

        debug!(
            "Loaded {} expenses from key '{}' ({} skipped)",
            collection.records.len(),
            self.key,
            collection.unrecognized.len()
        );
        Ok(collection)
    }

    /// Overwrite the full collection with `records` only.
    pub async fn write_all(&self, records: &[ExpenseRecord]) -> Result<(), ExpenseError> {
        let entries = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| ExpenseError::StorageWrite(e.to_string()))?;
        self.put_entries(&entries, records.len()).await
    }

    /// Overwrite the full collection, writing skipped entries back after the records.
    pub async fn write_collection(&self, collection: &StoredCollection) -> Result<(), ExpenseError> {
        let mut entries = collection
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| ExpenseError::StorageWrite(e.to_string()))?;
        entries.extend(collection.unrecognized.iter().cloned());
        self.put_entries(&entries, collection.records.len()).await
    }

    async fn put_entries(&self, entries: &[Value], record_count: usize) -> Result<(), ExpenseError> {
        let payload = serde_json::to_string(entries)
            .map_err(|e| ExpenseError::StorageWrite(e.to_string()))?;

        self.storage
            .put_value(&self.key, &payload)
            .await
            .map_err(|e| {
                error!("Failed to write key '{}': {:#}", self.key, e);
                ExpenseError::StorageWrite(e.to_string())
            })?;
        debug!("Wrote {} expenses to key '{}'", record_count, self.key);
        Ok(())
    }

    fn corrupt(&self, e: serde_json::Error) -> ExpenseError {
        error!("Stored payload under '{}' is corrupt: {}", self.key, e);
        ExpenseError::StorageRead(format!("corrupt payload under key '{}': {}", self.key, e))
    }
}

/// True when `entry` carries a category string outside the known set.
fn has_unrecognized_category(entry: &Value) -> bool {
    entry
        .get("category")
        .and_then(Value::as_str)
        .map_or(false, |label| label.parse::<Category>().is_err())
}
