//! Per-category aggregation feeding the summary pie chart.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Category, CategoryTotal, ExpenseRecord};

/// Slice colors, in slot order.
pub const DEFAULT_PALETTE: [&str; 4] = ["#FF6384", "#36A2EB", "#FFCD56", "#4BC0C0"];

/// How palette slots are handed out to categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorAssignment {
    /// Slot = position among the categories that survive the zero filter.
    /// A category's color depends on which other categories are present.
    #[default]
    SurvivingIndex,
    /// Slot = the category's fixed position, stable across calls.
    ByCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub palette: Vec<String>,
    pub assignment: ColorAssignment,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            assignment: ColorAssignment::default(),
        }
    }
}

impl ChartSettings {
    fn color_for(&self, slot: usize) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        self.palette[slot % self.palette.len()].clone()
    }
}

/// Sum amounts per category and derive chart slices.
///
/// Categories with no positive total are left out. Returns an empty vector
/// when nothing survives, so percentages never divide by zero.
pub fn aggregate(records: &[ExpenseRecord], settings: &ChartSettings) -> Vec<CategoryTotal> {
    let mut buckets = [0.0_f64; Category::COUNT];
    for record in records {
        if record.amount.is_finite() {
            buckets[record.category.index()] += record.amount;
        }
    }

    let mut totals: Vec<CategoryTotal> = Category::ALL
        .iter()
        .zip(buckets)
        .filter(|(_, amount)| *amount > 0.0)
        .enumerate()
        .map(|(surviving_index, (category, amount))| {
            let slot = match settings.assignment {
                ColorAssignment::SurvivingIndex => surviving_index,
                ColorAssignment::ByCategory => category.index(),
            };
            CategoryTotal {
                category: *category,
                amount,
                color: settings.color_for(slot),
                percentage_of_total: 0.0,
            }
        })
        .collect();

    let total = grand_total(&totals);
    if total <= 0.0 {
        return Vec::new();
    }
    for item in &mut totals {
        item.percentage_of_total = item.amount / total * 100.0;
    }
    totals
}

pub fn grand_total(totals: &[CategoryTotal]) -> f64 {
    totals.iter().map(|item| item.amount).sum()
}
