//! Filtering of the expense history by category and date range.
//!
//! All criteria are optional and combine with AND. The output keeps the
//! input order; an empty result is a valid answer, never an error.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::models::{Category, ExpenseRecord};
use crate::error::ValidationError;

/// Category criterion, with `All` as the "no constraint" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(shared::ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == shared::ALL_CATEGORIES {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: CategoryFilter,
    /// Inclusive lower bound
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub end_date: Option<DateTime<Utc>>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Restrict to whole calendar days as picked from a date picker.
    /// `start` widens to the first instant of its day, `end` to the last.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start.map(start_of_day);
        self.end_date = end.map(end_of_day);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category == CategoryFilter::All && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if !self.category.matches(record.category) {
            return false;
        }
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        true
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Records matching every criterion of `filter`, in input order.
pub fn filter_expenses(records: &[ExpenseRecord], filter: &ExpenseFilter) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Running total shown above the history list.
pub fn total_amount(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}
