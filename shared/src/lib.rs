use serde::{Deserialize, Serialize};
use std::fmt;

/// Category labels offered by the add-expense picker, in display order
pub const CATEGORY_OPTIONS: [&str; 4] = ["Food", "Travel", "Shopping", "Other"];

/// Label of the filter picker entry that matches every category
pub const ALL_CATEGORIES: &str = "All";

/// A single row of the expense history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub title: String,
    /// Raw amount, always positive
    pub amount: f64,
    /// Category label ("Food", "Travel", ...)
    pub category: String,
    /// ISO-8601 timestamp of the expense
    pub date: String,
    /// Amount and category line, e.g. "Rs. 500.00 | Food"
    pub details: String,
    /// Human-readable date, e.g. "Fri Jan 05 2024"
    pub date_display: String,
    /// Local reference to a receipt photo, if one was attached
    pub image_uri: Option<String>,
}

/// Everything the history screen needs to render one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListView {
    /// Sum of the amounts of the visible rows
    pub total: f64,
    /// Header line, e.g. "Total: Rs. 800.00"
    pub total_display: String,
    /// Currently selected category filter label ("All" when unfiltered)
    pub category_filter: String,
    /// Label for the start-date button ("Start Date" when unset)
    pub start_date_label: String,
    /// Label for the end-date button ("End Date" when unset)
    pub end_date_label: String,
    pub rows: Vec<ExpenseRow>,
}

/// One slice of the category pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub amount: f64,
    /// Slice color as a hex string
    pub color: String,
    pub legend_font_color: String,
    pub legend_font_size: u32,
    pub percentage_of_total: f64,
    /// e.g. "Rs. 500.00"
    pub amount_display: String,
    /// e.g. "62.5%"
    pub percentage_display: String,
}

/// Everything the summary screen needs to render one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub title: String,
    pub slices: Vec<ChartSlice>,
    pub total: f64,
    /// Shown instead of the chart when there is nothing to plot
    pub empty_message: Option<String>,
}

/// Raw input of the add-expense form as it arrives from the widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseRequest {
    pub title: String,
    /// Amount exactly as typed by the user
    pub amount: String,
    pub category: String,
    /// Optional date override (RFC 3339 or YYYY-MM-DD), defaults to now
    pub date: Option<String>,
    pub image_uri: Option<String>,
}

/// Kind of alert shown to the user after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    ValidationError,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            NoticeKind::Success => "Success",
            NoticeKind::ValidationError => "Validation Error",
            NoticeKind::Error => "Error",
        };
        write!(f, "{}", title)
    }
}

/// A user-facing alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseResponse {
    pub notice: Notice,
    /// Id of the stored expense when the save succeeded
    pub expense_id: Option<String>,
}

/// Palette used by every screen for the current theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
    pub card: String,
    pub input: String,
    pub button: String,
}

impl ThemeColors {
    pub fn light() -> Self {
        Self {
            background: "#F2F4F7".to_string(),
            text: "#1F2937".to_string(),
            card: "#FFFFFF".to_string(),
            input: "#E5E7EB".to_string(),
            button: "#3B82F6".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#F5F5F5".to_string(),
            card: "#1E1E1E".to_string(),
            input: "#2C2C2C".to_string(),
            button: "#60A5FA".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_title_follows_kind() {
        let notice = Notice::new(NoticeKind::ValidationError, "bad input");
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.message, "bad input");
    }

    #[test]
    fn test_expense_row_serializes_with_snake_case_fields() {
        let row = ExpenseRow {
            id: "expense::1::abc".to_string(),
            title: "Lunch".to_string(),
            amount: 500.0,
            category: "Food".to_string(),
            date: "2024-01-05T00:00:00.000Z".to_string(),
            details: "Rs. 500.00 | Food".to_string(),
            date_display: "Fri Jan 05 2024".to_string(),
            image_uri: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date_display"], "Fri Jan 05 2024");
        assert!(json["image_uri"].is_null());
    }
}
