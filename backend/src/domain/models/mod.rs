pub mod category_total;
pub mod expense;

pub use category_total::CategoryTotal;
pub use expense::{Category, ExpenseRecord};
