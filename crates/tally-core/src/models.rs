//! Domain models for Tally

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Textual date format used wherever dates cross into the ledger file.
///
/// Previously persisted ledgers depend on this exact format, so it must not
/// change.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Column headers of the ledger file, in order
pub const LEDGER_HEADERS: [&str; 4] = ["date", "category", "amount", "notes"];

/// A ledger row as stored, with no validation guarantee
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub notes: String,
}

impl RawRecord {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            notes: notes.into(),
        }
    }
}

/// A validated expense that survived normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub category: String,
    /// Non-negative amount
    pub amount: Decimal,
    pub notes: String,
}

impl Entry {
    /// Render back into the stored textual form
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            date: self.date.format(DATE_FORMAT).to_string(),
            category: self.category.clone(),
            amount: self.amount.to_string(),
            notes: self.notes.clone(),
        }
    }
}

/// Sum of all entries on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Whole days elapsed since the earliest observed date
    pub day_index: i64,
}

/// One projected day of spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Never negative
    pub predicted_amount: Decimal,
}
