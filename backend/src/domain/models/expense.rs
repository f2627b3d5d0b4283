//! Domain model for a recorded expense.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// The closed set of spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Other,
}

impl Category {
    pub const COUNT: usize = 4;

    /// All categories in picker and chart order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Other,
    ];

    /// Picker label, as listed in [`shared::CATEGORY_OPTIONS`].
    pub fn as_str(&self) -> &'static str {
        shared::CATEGORY_OPTIONS[self.index()]
    }

    /// Position of the category in [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// One user-entered expense as it is persisted.
///
/// The JSON shape is `{id, title, amount, category, date, imageUri}` with
/// `date` as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl ExpenseRecord {
    /// Generate a unique expense id from a creation timestamp.
    /// Format: expense::<timestamp_ms>::<random_suffix>
    /// Example: expense::1704412800000::9f86d081
    pub fn generate_id(timestamp_ms: i64) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("expense::{}::{}", timestamp_ms, &suffix[..8])
    }

    /// Extract the creation timestamp from an id produced by [`generate_id`].
    ///
    /// [`generate_id`]: ExpenseRecord::generate_id
    pub fn parse_id_timestamp(id: &str) -> Option<i64> {
        let mut parts = id.split("::");
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("expense"), Some(timestamp), Some(_), None) => timestamp.parse().ok(),
            _ => None,
        }
    }
}

/// Serialize dates the way `Date.toISOString()` does and accept either a
/// full RFC 3339 timestamp or a bare `YYYY-MM-DD` date when reading.
pub(crate) mod iso_date {
    use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Drop everything below the millisecond, the precision dates are stored at.
    pub fn to_stored_precision(date: DateTime<Utc>) -> DateTime<Utc> {
        date.trunc_subsecs(3)
    }

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{}`", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc())
    }
}
