//! Error types surfaced by the expense store and the add-expense flow.
//!
//! - [`ValidationError`] is raised before anything is persisted.
//! - [`ExpenseError`] wraps validation failures together with storage and
//!   configuration faults. Storage backends report through `anyhow`; the
//!   repository converts those into [`ExpenseError::StorageRead`] or
//!   [`ExpenseError::StorageWrite`].
use thiserror::Error;

/// User input that violates the expense record invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("amount `{0}` is not a number")]
    AmountNotNumeric(String),
    #[error("amount must be greater than zero, got {0}")]
    AmountNotPositive(f64),
    #[error("`{0}` is not a known category")]
    UnknownCategory(String),
    #[error("`{0}` is not a valid date")]
    InvalidDate(String),
    #[error("an expense with id `{0}` already exists")]
    DuplicateId(String),
}

/// Errors returned by the expense store and everything built on top of it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpenseError {
    #[error("invalid expense: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to read stored expenses: {0}")]
    StorageRead(String),
    #[error("failed to write stored expenses: {0}")]
    StorageWrite(String),
    #[error("storage is unavailable: {0}")]
    StorageUnavailable(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExpenseError {
    /// Message suitable for an alert. Storage faults of every kind collapse
    /// into the same notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExpenseError::Validation(_) => "Please enter valid title and numeric amount.",
            ExpenseError::Config(_) => "The expense tracker is not configured correctly.",
            ExpenseError::StorageRead(_)
            | ExpenseError::StorageWrite(_)
            | ExpenseError::StorageUnavailable(_) => "Failed to save expense.",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ExpenseError::Validation(_))
    }
}
