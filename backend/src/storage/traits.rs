//! # Storage Traits
//!
//! The key-value abstraction the expense store is written against. Any
//! backend that can get and put a string under a key can hold the expense
//! collection.

use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for a local key-value persistence area
///
/// Each key holds one opaque string value. Writing a key replaces its value
/// entirely; implementations must never leave a half-written value behind.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the value stored under `key`, or `None` if the key was never written
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any existing value
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}
