//! # Application Config
//!
//! Settings are read from a single YAML file, by default
//! `<config dir>/expense-tracker/config.yaml`.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "/home/me/.local/share/expense-tracker"
//! storage_backend: sqlite
//! database_file: "expenses.db"
//! storage_key: "expenses"
//! currency_symbol: "Rs."
//! chart_palette: ["#FF6384", "#36A2EB", "#FFCD56", "#4BC0C0"]
//! color_assignment: surviving_index
//! theme: light
//! log_filter: "info"
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::domain::aggregation::{ChartSettings, ColorAssignment, DEFAULT_PALETTE};
use crate::domain::theme::ThemeMode;
use crate::error::ExpenseError;
use crate::storage::{FileConnection, DEFAULT_STORAGE_KEY};

const APP_DIRECTORY: &str = "expense-tracker";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single SQLite database holding a key/value table
    #[default]
    Sqlite,
    /// One JSON file per key inside the data directory
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub storage_backend: StorageBackend,
    /// Relative paths are resolved against `data_directory`
    pub database_file: PathBuf,
    pub storage_key: String,
    pub currency_symbol: String,
    pub chart_palette: Vec<String>,
    pub color_assignment: ColorAssignment,
    pub theme: ThemeMode,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            storage_backend: StorageBackend::default(),
            database_file: PathBuf::from("expenses.db"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: "Rs.".to_string(),
            chart_palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            color_assignment: ColorAssignment::default(),
            theme: ThemeMode::default(),
            log_filter: "info".to_string(),
        }
    }
}

fn default_data_directory() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIRECTORY)
}

impl AppConfig {
    /// Path of the per-user config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIRECTORY).join(CONFIG_FILE))
    }

    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ExpenseError> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .map_err(|e| ExpenseError::Config(format!("cannot read {:?}: {}", path, e)))?;
        let config: AppConfig = if yaml_content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&yaml_content)
                .map_err(|e| ExpenseError::Config(format!("cannot parse {:?}: {}", path, e)))?
        };
        config.validate()?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from [`AppConfig::default_path`], falling back to the defaults.
    pub fn load_or_default() -> Result<Self, ExpenseError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Write the config to `path` through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), ExpenseError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExpenseError::Config(format!("cannot create {:?}: {}", parent, e)))?;
        }

        let yaml_content = serde_yaml::to_string(self)
            .map_err(|e| ExpenseError::Config(e.to_string()))?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .and_then(|_| fs::rename(&temp_path, path))
            .map_err(|e| ExpenseError::Config(format!("cannot write {:?}: {}", path, e)))?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.storage_key.trim().is_empty() {
            return Err(ExpenseError::Config("storage_key must not be empty".to_string()));
        }
        if self.storage_backend == StorageBackend::File
            && !FileConnection::is_valid_key(&self.storage_key)
        {
            return Err(ExpenseError::Config(format!(
                "storage_key '{}' may only contain letters, digits, '-', '_' and '.' with the file backend",
                self.storage_key
            )));
        }
        if self.chart_palette.is_empty() {
            return Err(ExpenseError::Config("chart_palette must not be empty".to_string()));
        }
        if let Err(e) = EnvFilter::try_new(&self.log_filter) {
            return Err(ExpenseError::Config(format!(
                "log_filter '{}' is invalid: {}",
                self.log_filter, e
            )));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(&self.database_file)
    }

    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            palette: self.chart_palette.clone(),
            assignment: self.color_assignment,
        }
    }
}
