//! Derived per-category spend, never persisted.
use super::expense::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    /// Presentation color as a hex string
    pub color: String,
    /// Share of the grand total in percent (unrounded)
    pub percentage_of_total: f64,
}

impl CategoryTotal {
    /// Percentage rounded to one decimal place, e.g. "62.5%".
    pub fn percentage_display(&self) -> String {
        format!("{:.1}%", self.percentage_of_total)
    }
}
