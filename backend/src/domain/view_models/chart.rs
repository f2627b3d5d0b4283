//! State behind the expense summary (pie chart) screen.
use shared::ChartView;
use tracing::debug;

use super::mappers::CategoryTotalMapper;
use crate::domain::aggregation::{self, ChartSettings};
use crate::domain::filter::ExpenseFilter;
use crate::domain::expense_service::ExpenseService;
use crate::domain::models::CategoryTotal;
use crate::domain::theme::ThemeSettings;
use crate::error::ExpenseError;

pub const CHART_TITLE: &str = "Expense Summary";
pub const NO_DATA_MESSAGE: &str = "No data available";

pub struct ChartViewModel {
    service: ExpenseService,
    theme: ThemeSettings,
    settings: ChartSettings,
    filter: ExpenseFilter,
    totals: Vec<CategoryTotal>,
}

impl ChartViewModel {
    pub fn new(service: ExpenseService, theme: ThemeSettings, settings: ChartSettings) -> Self {
        Self {
            service,
            theme,
            settings,
            filter: ExpenseFilter::new(),
            totals: Vec::new(),
        }
    }

    /// Restrict the chart to a subset of expenses. Takes effect on the next refresh.
    pub fn set_filter(&mut self, filter: ExpenseFilter) {
        self.filter = filter;
    }

    /// Reload stored expenses and recompute the totals.
    pub async fn refresh(&mut self) -> Result<(), ExpenseError> {
        self.totals = self.service.category_totals(&self.filter, &self.settings).await?;
        debug!("Chart refreshed with {} slices", self.totals.len());
        Ok(())
    }

    pub fn totals(&self) -> &[CategoryTotal] {
        &self.totals
    }

    pub fn view(&self) -> ChartView {
        let theme = self.theme.snapshot();
        let currency = self.service.currency_symbol();

        ChartView {
            title: CHART_TITLE.to_string(),
            slices: self
                .totals
                .iter()
                .map(|total| CategoryTotalMapper::to_slice(total, currency, &theme.colors.text))
                .collect(),
            total: aggregation::grand_total(&self.totals),
            empty_message: self
                .totals
                .is_empty()
                .then(|| NO_DATA_MESSAGE.to_string()),
        }
    }
}
