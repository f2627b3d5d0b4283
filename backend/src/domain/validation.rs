//! Boundary validation for expense input.
//!
//! Form widgets hand over untyped strings; everything is checked here before
//! a record can reach the store.

use crate::domain::models::{Category, ExpenseRecord};
use crate::error::ValidationError;

/// Parse an amount typed by the user.
///
/// Surrounding whitespace, the currency symbol and thousands separators are
/// stripped first. The result must be a finite number greater than zero.
pub fn parse_amount(input: &str, currency_symbol: &str) -> Result<f64, ValidationError> {
    let mut cleaned = input.trim().to_string();
    if !currency_symbol.is_empty() {
        cleaned = cleaned.replace(currency_symbol, "");
    }
    let cleaned = cleaned.replace(',', "").replace(' ', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| ValidationError::AmountNotNumeric(input.to_string()))?;
    if !amount.is_finite() {
        return Err(ValidationError::AmountNotNumeric(input.to_string()));
    }
    check_amount(amount)?;
    Ok(amount)
}

pub fn parse_category(input: &str) -> Result<Category, ValidationError> {
    input.parse()
}

pub fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

pub fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_nan() || amount.is_infinite() {
        return Err(ValidationError::AmountNotNumeric(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive(amount));
    }
    Ok(())
}

/// Check a fully built record against the record invariants.
///
/// The category is already a closed enum at this point, so only the title
/// and amount need checking. Id uniqueness depends on the stored collection
/// and is checked by the store.
pub fn validate_record(record: &ExpenseRecord) -> Result<(), ValidationError> {
    check_title(&record.title)?;
    check_amount(record.amount)?;
    Ok(())
}
