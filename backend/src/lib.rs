//! # Expense Tracker Backend
//!
//! Core of a personal expense tracker: a persisted expense store, the
//! filter and aggregation logic behind the history and summary screens,
//! and the view models a screen shell drives. This crate:
//! - Keeps the whole collection as one JSON array under one storage key
//! - Supports a SQLite key/value table or a plain data directory as backend
//! - Leaves pickers, camera and navigation to the shell

use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use config::{AppConfig, StorageBackend};
pub use domain::models::{Category, CategoryTotal, ExpenseRecord};
pub use domain::{ExpenseFilter, ExpenseService, ThemeSettings};
pub use error::{ExpenseError, ValidationError};

use domain::view_models::{AddExpenseForm, ChartViewModel, ExpenseListViewModel};
use storage::{DbConnection, ExpenseRepository, FileConnection, KeyValueStorage};

/// Everything a screen shell needs, built once at startup and cloned freely.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub expense_service: ExpenseService,
    pub theme: ThemeSettings,
}

impl AppState {
    pub fn expense_list(&self) -> ExpenseListViewModel {
        ExpenseListViewModel::new(self.expense_service.clone())
    }

    pub fn chart(&self) -> ChartViewModel {
        ChartViewModel::new(
            self.expense_service.clone(),
            self.theme.clone(),
            self.config.chart_settings(),
        )
    }

    pub fn add_expense_form(&self) -> AddExpenseForm {
        AddExpenseForm::new(self.expense_service.clone())
    }
}

/// Install logging, open the configured storage backend and wire up the
/// services. Logging is left alone when a subscriber is already installed.
pub async fn initialize_backend(config: AppConfig) -> Result<AppState, ExpenseError> {
    config.validate()?;
    logging::init_logging(&config.log_filter);

    let storage: Arc<dyn KeyValueStorage> = match config.storage_backend {
        StorageBackend::Sqlite => {
            let path = config.database_path();
            info!("Opening SQLite storage at {:?}", path);
            let db = DbConnection::open_file(&path)
                .await
                .map_err(|e| ExpenseError::StorageUnavailable(e.to_string()))?;
            Arc::new(db)
        }
        StorageBackend::File => {
            info!("Opening file storage at {:?}", config.data_directory);
            let connection = FileConnection::new(&config.data_directory)
                .map_err(|e| ExpenseError::StorageUnavailable(e.to_string()))?;
            Arc::new(connection)
        }
    };

    let repository = ExpenseRepository::new(storage, config.storage_key.clone());
    let expense_service = ExpenseService::new(repository, config.currency_symbol.clone());
    let theme = ThemeSettings::new(config.theme);

    Ok(AppState {
        config,
        expense_service,
        theme,
    })
}
