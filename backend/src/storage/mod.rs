//! # Storage Module
//!
//! Handles persistence of the expense collection.
//!
//! The domain layer only ever sees [`ExpenseRepository`], which keeps the
//! whole collection as one JSON array under one key. The key-value area
//! behind it is pluggable:
//!
//! - **SQLite**: a `key_values` table accessed through SQLx
//! - **File**: one JSON file per key inside a data directory
//!
//! Both backends implement [`KeyValueStorage`] and replace a key's value in
//! a single step, so a failed write never leaves a partial collection.

pub mod expense_repository;
pub mod file;
pub mod sqlite;
pub mod traits;

pub use expense_repository::{ExpenseRepository, StoredCollection, DEFAULT_STORAGE_KEY};
pub use file::FileConnection;
pub use sqlite::DbConnection;
pub use traits::KeyValueStorage;
