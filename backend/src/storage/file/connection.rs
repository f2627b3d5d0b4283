//! # File Key-Value Storage
//!
//! Stores every key as its own JSON file inside a data directory, the way a
//! mobile key-value store keeps one entry per key.
//!
//! ```text
//! data/
//! └── expenses.json    ← value of the `expenses` key
//! ```
//!
//! Writes go to a temp file first and are renamed over the target, so a
//! crash mid-write leaves the previous value intact.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::storage::traits::KeyValueStorage;

#[derive(Debug, Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new file connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Keys are restricted to a safe character set so they can never
    /// escape the base directory.
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    }

    /// Path of the file holding `key`.
    pub fn value_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_valid_key(key) {
            return Err(anyhow!("Invalid storage key '{}'", key));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileConnection {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No file for key '{}' at {}", key, path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        fs::create_dir_all(&self.base_directory).await?;

        // Use atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &path).await?;

        debug!("Saved key '{}' to {}", key, path.display());
        Ok(())
    }
}
