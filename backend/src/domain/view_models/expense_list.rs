//! State behind the expense history screen.
use chrono::NaiveDate;
use shared::ExpenseListView;
use tracing::debug;

use super::mappers::{format_day, format_money, ExpenseMapper};
use crate::domain::expense_service::ExpenseService;
use crate::domain::filter::{self, CategoryFilter, ExpenseFilter};
use crate::domain::models::ExpenseRecord;
use crate::error::ExpenseError;

/// Holds a snapshot of the stored expenses plus the user's filter choices.
///
/// The snapshot is only as fresh as the last [`refresh`] call; expenses
/// added elsewhere show up after the next refresh.
///
/// [`refresh`]: ExpenseListViewModel::refresh
pub struct ExpenseListViewModel {
    service: ExpenseService,
    expenses: Vec<ExpenseRecord>,
    category: CategoryFilter,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl ExpenseListViewModel {
    pub fn new(service: ExpenseService) -> Self {
        Self {
            service,
            expenses: Vec::new(),
            category: CategoryFilter::All,
            start_date: None,
            end_date: None,
        }
    }

    /// Re-read the stored collection. Call when the screen becomes active.
    pub async fn refresh(&mut self) -> Result<(), ExpenseError> {
        self.expenses = self.service.load().await?;
        debug!("Expense list refreshed with {} expenses", self.expenses.len());
        Ok(())
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Set the category from a picker label ("All", "Food", ...).
    pub fn select_category(&mut self, label: &str) -> Result<(), ExpenseError> {
        self.category = label.parse()?;
        Ok(())
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
    }

    pub fn clear_filters(&mut self) {
        self.category = CategoryFilter::All;
        self.start_date = None;
        self.end_date = None;
    }

    pub fn filter(&self) -> ExpenseFilter {
        ExpenseFilter::new()
            .with_category(self.category)
            .with_date_range(self.start_date, self.end_date)
    }

    pub fn filtered(&self) -> Vec<ExpenseRecord> {
        filter::filter_expenses(&self.expenses, &self.filter())
    }

    pub fn view(&self) -> ExpenseListView {
        let currency = self.service.currency_symbol();
        let filtered = self.filtered();
        let total = filter::total_amount(&filtered);

        ExpenseListView {
            total,
            total_display: format!("Total: {}", format_money(currency, total)),
            category_filter: self.category.to_string(),
            start_date_label: self
                .start_date
                .map(format_day)
                .unwrap_or_else(|| "Start Date".to_string()),
            end_date_label: self
                .end_date
                .map(format_day)
                .unwrap_or_else(|| "End Date".to_string()),
            rows: filtered
                .iter()
                .map(|record| ExpenseMapper::to_row(record, currency))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Category;
    use crate::storage::{KeyValueStorage, DEFAULT_STORAGE_KEY};
    use crate::test_utils::{sample_expense, TestEnvironment};

    async fn setup(env: &TestEnvironment) -> ExpenseListViewModel {
        let service = env.file_service();
        service
            .replace_all(vec![
                sample_expense("Lunch", 500.0, Category::Food, "2024-01-05T12:00:00Z"),
                sample_expense("Taxi", 300.0, Category::Travel, "2024-01-06T09:15:00Z"),
                sample_expense("Dinner", 250.5, Category::Food, "2024-01-10T20:00:00Z"),
            ])
            .await
            .unwrap();
        let mut list = ExpenseListViewModel::new(service);
        list.refresh().await.unwrap();
        list
    }

    #[tokio::test]
    async fn test_unfiltered_view() {
        let env = TestEnvironment::new().unwrap();
        let list = setup(&env).await;
        let view = list.view();

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.total_display, "Total: Rs. 1050.50");
        assert_eq!(view.category_filter, "All");
        assert_eq!(view.start_date_label, "Start Date");
        assert_eq!(view.end_date_label, "End Date");
    }

    #[tokio::test]
    async fn test_category_and_date_filters() {
        let env = TestEnvironment::new().unwrap();
        let mut list = setup(&env).await;

        list.select_category("Food").unwrap();
        let titles: Vec<String> = list.view().rows.into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Lunch", "Dinner"]);

        list.set_end_date(NaiveDate::from_ymd_opt(2024, 1, 5));
        let view = list.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total, 500.0);
        assert_eq!(view.end_date_label, "Fri Jan 05 2024");

        list.clear_filters();
        assert_eq!(list.view().rows.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_category_label_is_rejected() {
        let env = TestEnvironment::new().unwrap();
        let mut list = setup(&env).await;
        assert!(list.select_category("Rent").unwrap_err().is_validation());
        assert_eq!(list.filter().category, CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_snapshot_is_stale_until_refresh() {
        let env = TestEnvironment::new().unwrap();
        let mut list = setup(&env).await;

        env.file_service()
            .append(sample_expense("Bus", 20.0, Category::Travel, "2024-01-11"))
            .await
            .unwrap();
        assert_eq!(list.view().rows.len(), 3);

        list.refresh().await.unwrap();
        assert_eq!(list.view().rows.len(), 4);
    }

    #[tokio::test]
    async fn test_unrecognized_category_is_left_out_of_list() {
        let env = TestEnvironment::new().unwrap();
        let payload = r#"[
            {"id":"a","title":"Lunch","amount":500,"category":"Food","date":"2024-01-05T12:00:00.000Z"},
            {"id":"b","title":"Rent","amount":10,"category":"Housing","date":"2024-01-01T12:00:00.000Z"}
        ]"#;
        env.connection
            .put_value(DEFAULT_STORAGE_KEY, payload)
            .await
            .unwrap();
        let mut list = ExpenseListViewModel::new(env.file_service());
        list.refresh().await.unwrap();

        let view = list.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].title, "Lunch");
        assert_eq!(view.total_display, "Total: Rs. 500.00");
    }
}
