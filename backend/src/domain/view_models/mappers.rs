use chrono::{DateTime, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use shared::{ChartSlice, ExpenseRow};
use std::fmt::Display;

use crate::domain::models::{CategoryTotal, ExpenseRecord};

/// Font size of chart legend entries
pub const LEGEND_FONT_SIZE: u32 = 14;

/// "Rs. 500.00"
pub fn format_money(currency_symbol: &str, amount: f64) -> String {
    if currency_symbol.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{} {:.2}", currency_symbol, amount)
    }
}

const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// "Fri Jan 05 2024", in the device's local time zone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    format_date_in(date, &Local)
}

pub fn format_date_in<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format(DATE_DISPLAY_FORMAT).to_string()
}

/// Label for a calendar day picked in a date picker.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_DISPLAY_FORMAT).to_string()
}

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_row(record: &ExpenseRecord, currency_symbol: &str) -> ExpenseRow {
        ExpenseRow {
            id: record.id.clone(),
            title: record.title.clone(),
            amount: record.amount,
            category: record.category.to_string(),
            date: record.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            details: format!(
                "{} | {}",
                format_money(currency_symbol, record.amount),
                record.category
            ),
            date_display: format_date(&record.date),
            image_uri: record.image_uri.clone(),
        }
    }
}

pub struct CategoryTotalMapper;

impl CategoryTotalMapper {
    pub fn to_slice(
        total: &CategoryTotal,
        currency_symbol: &str,
        legend_font_color: &str,
    ) -> ChartSlice {
        ChartSlice {
            name: total.category.to_string(),
            amount: total.amount,
            color: total.color.clone(),
            legend_font_color: legend_font_color.to_string(),
            legend_font_size: LEGEND_FONT_SIZE,
            percentage_of_total: total.percentage_of_total,
            amount_display: format_money(currency_symbol, total.amount),
            percentage_display: total.percentage_display(),
        }
    }
}
