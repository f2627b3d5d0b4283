//! Expense store service: load, append and overwrite the expense collection.
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::aggregation::{self, ChartSettings};
use crate::domain::commands::expenses::CreateExpenseCommand;
use crate::domain::filter::{self, ExpenseFilter};
use crate::domain::models::expense::iso_date;
use crate::domain::models::{CategoryTotal, ExpenseRecord};
use crate::domain::validation;
use crate::error::{ExpenseError, ValidationError};
use crate::storage::ExpenseRepository;

#[derive(Clone)]
pub struct ExpenseService {
    repository: ExpenseRepository,
    currency_symbol: String,
    /// Serializes read-modify-write cycles between callers sharing this service
    write_lock: Arc<Mutex<()>>,
}

impl ExpenseService {
    pub fn new(repository: ExpenseRepository, currency_symbol: impl Into<String>) -> Self {
        Self {
            repository,
            currency_symbol: currency_symbol.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Read every stored expense in insertion order.
    pub async fn load(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        self.repository.read_all().await
    }

    /// Validate `record` and add it to the stored collection.
    ///
    /// The date is cut to millisecond precision before storing. Nothing is
    /// written when validation or the initial read fails. Stored entries with
    /// an unrecognized category are kept as they are.
    pub async fn append(&self, mut record: ExpenseRecord) -> Result<(), ExpenseError> {
        if let Err(e) = validation::validate_record(&record) {
            warn!("Rejected expense '{}': {}", record.id, e);
            return Err(e.into());
        }
        record.date = iso_date::to_stored_precision(record.date);

        let _guard = self.write_lock.lock().await;
        let mut collection = self.repository.read_collection().await?;
        if collection.records.iter().any(|existing| existing.id == record.id) {
            warn!("Rejected expense with duplicate id '{}'", record.id);
            return Err(ValidationError::DuplicateId(record.id).into());
        }

        let id = record.id.clone();
        collection.records.push(record);
        self.repository.write_collection(&collection).await?;

        info!("Stored expense '{}' ({} total)", id, collection.records.len());
        Ok(())
    }

    /// Replace the stored collection with `records`.
    ///
    /// Every record is validated and ids must be unique among them. Dates
    /// are cut to millisecond precision.
    pub async fn replace_all(&self, mut records: Vec<ExpenseRecord>) -> Result<(), ExpenseError> {
        for record in records.iter_mut() {
            record.date = iso_date::to_stored_precision(record.date);
        }
        let mut seen = HashSet::new();
        for record in &records {
            validation::validate_record(record)?;
            if !seen.insert(record.id.as_str()) {
                return Err(ValidationError::DuplicateId(record.id.clone()).into());
            }
        }

        let _guard = self.write_lock.lock().await;
        self.repository.write_all(&records).await?;
        info!("Replaced stored collection with {} expenses", records.len());
        Ok(())
    }

    /// The add-expense flow: validate raw form input, build a record with a
    /// fresh id and append it.
    pub async fn create_expense(
        &self,
        command: CreateExpenseCommand,
    ) -> Result<ExpenseRecord, ExpenseError> {
        validation::check_title(&command.title)?;
        let amount = validation::parse_amount(&command.amount_input, &self.currency_symbol)?;
        let category = validation::parse_category(&command.category)?;

        let now = iso_date::to_stored_precision(Utc::now());
        let image_uri = command
            .image_uri
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty());

        let record = ExpenseRecord {
            id: ExpenseRecord::generate_id(now.timestamp_millis()),
            title: command.title.trim().to_string(),
            amount,
            category,
            date: command.date.map_or(now, iso_date::to_stored_precision),
            image_uri,
        };

        self.append(record.clone()).await?;
        Ok(record)
    }

    /// Stored expenses matching `filter`, in insertion order.
    pub async fn list_expenses(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        let expenses = self.load().await?;
        Ok(filter::filter_expenses(&expenses, filter))
    }

    /// Per-category totals over stored expenses matching `filter`.
    pub async fn category_totals(
        &self,
        filter: &ExpenseFilter,
        settings: &ChartSettings,
    ) -> Result<Vec<CategoryTotal>, ExpenseError> {
        let expenses = self.list_expenses(filter).await?;
        Ok(aggregation::aggregate(&expenses, settings))
    }
}
