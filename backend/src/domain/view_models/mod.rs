//! Screen-facing state. Each view model pulls from [`ExpenseService`] and
//! shapes the DTOs of the `shared` crate.
//!
//! [`ExpenseService`]: crate::domain::expense_service::ExpenseService
pub mod add_expense;
pub mod chart;
pub mod expense_list;
pub mod mappers;

pub use add_expense::{handle_add_expense, AddExpenseForm};
pub use chart::ChartViewModel;
pub use expense_list::ExpenseListViewModel;
