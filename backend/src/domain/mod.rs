//! # Domain Layer
//!
//! Business logic of the expense tracker, independent of the storage
//! backend in use:
//! - `expense_service`: the expense store (load, append, replace, create)
//! - `filter`: category and date-range selection
//! - `aggregation`: per-category totals for the summary chart
//! - `view_models`: state behind the history, chart and add-expense screens
//! - `theme`: light/dark palette handle

pub mod aggregation;
pub mod commands;
pub mod expense_service;
pub mod filter;
pub mod models;
pub mod theme;
pub mod validation;
pub mod view_models;

pub use aggregation::{ChartSettings, ColorAssignment};
pub use expense_service::ExpenseService;
pub use filter::{CategoryFilter, ExpenseFilter};
pub use theme::{Theme, ThemeMode, ThemeSettings};
