//! Normalization of raw ledger rows into typed entries
//!
//! Each stored row goes through two strict parsers (date and amount). Rows
//! that fail either one are dropped: this is data cleaning, not validation.
//! Input is validated before it is written (see [`crate::ledger::Ledger::add`]),
//! so anything rejected here was hand-edited or written by an older version.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{Entry, RawRecord, DATE_FORMAT};

/// dd/mm/yyyy, zero-padded
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));

/// Plain unsigned number: digits with at most one decimal point, at least one digit
static AMOUNT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)$").expect("valid regex"));

/// Why a single row was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("invalid date {0:?} (expected dd/mm/yyyy)")]
    InvalidDate(String),

    #[error("invalid amount {0:?} (expected a plain number like 100 or 99.50)")]
    InvalidAmount(String),
}

/// Parse a `dd/mm/yyyy` date, rejecting impossible calendar dates
pub fn parse_date(s: &str) -> Result<NaiveDate, RowError> {
    let s = s.trim();
    if !DATE_SHAPE.is_match(s) {
        return Err(RowError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RowError::InvalidDate(s.to_string()))
}

/// Parse a plain non-negative decimal amount
///
/// Accepts `100`, `99.50`, `5.` and `.5`. Signs, exponents and thousands
/// separators are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, RowError> {
    let s = s.trim();
    if !AMOUNT_SHAPE.is_match(s) {
        return Err(RowError::InvalidAmount(s.to_string()));
    }

    let digits = s.strip_suffix('.').unwrap_or(s);
    let digits = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    // Fails only when the value does not fit in a Decimal
    Decimal::from_str(&digits).map_err(|_| RowError::InvalidAmount(s.to_string()))
}

/// Parse one stored row into an entry
pub fn parse_record(raw: &RawRecord) -> Result<Entry, RowError> {
    let date = parse_date(&raw.date)?;
    let amount = parse_amount(&raw.amount)?;

    Ok(Entry {
        date,
        category: raw.category.trim().to_string(),
        amount,
        notes: raw.notes.trim().to_string(),
    })
}

/// Entries that survived normalization plus how many rows were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub entries: Vec<Entry>,
    pub skipped: usize,
}

/// Parse all rows, dropping the ones that fail, and count the drops
pub fn normalize_with_report(records: &[RawRecord]) -> Normalized {
    records
        .iter()
        .enumerate()
        .fold(Normalized::default(), |mut acc, (row, raw)| {
            match parse_record(raw) {
                Ok(entry) => acc.entries.push(entry),
                Err(e) => {
                    debug!("Skipping ledger row {}: {}", row + 1, e);
                    acc.skipped += 1;
                }
            }
            acc
        })
}

/// Parse all rows, silently dropping the ones that fail
///
/// Surviving entries keep their original relative order.
pub fn normalize(records: &[RawRecord]) -> Vec<Entry> {
    normalize_with_report(records).entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("01/02/2024").unwrap(), date(2024, 2, 1));
        assert_eq!(parse_date(" 29/02/2024 ").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_rejects_invalid_calendar_dates() {
        assert!(parse_date("31/02/2024").is_err());
        assert!(parse_date("29/02/2023").is_err());
        assert!(parse_date("00/01/2024").is_err());
        assert!(parse_date("01/13/2024").is_err());
    }

    #[test]
    fn test_parse_date_requires_zero_padding() {
        assert!(parse_date("1/1/2024").is_err());
        assert!(parse_date("01/01/24").is_err());
        assert!(parse_date("2024-01-01").is_err());
        assert!(parse_date("01/01/02024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), Decimal::new(100, 0));
        assert_eq!(parse_amount("99.50").unwrap(), Decimal::new(9950, 2));
        assert_eq!(parse_amount("5.").unwrap(), Decimal::new(5, 0));
        assert_eq!(parse_amount(".5").unwrap(), Decimal::new(5, 1));
        assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_non_plain_numbers() {
        for bad in ["abc", "", ".", "-5", "+5", "1e3", "1,000", "$10", "1.2.3", "NaN"] {
            assert_eq!(
                parse_amount(bad),
                Err(RowError::InvalidAmount(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        let huge = "9".repeat(40);
        assert!(parse_amount(&huge).is_err());
    }

    #[test]
    fn test_parse_record_round_trip() {
        let entry = Entry {
            date: date(2024, 3, 9),
            category: "Groceries".to_string(),
            amount: Decimal::new(4599, 2),
            notes: "weekly shop".to_string(),
        };

        assert_eq!(parse_record(&entry.to_raw()).unwrap(), entry);
    }

    #[test]
    fn test_normalize_drops_bad_rows_and_keeps_order() {
        let records = vec![
            RawRecord::new("02/01/2024", "Food", "20", ""),
            RawRecord::new("01/01/2024", "Food", "abc", ""),
            RawRecord::new("31/02/2024", "Rent", "500", ""),
            RawRecord::new("01/01/2024", "Travel", "10.25", "bus"),
        ];

        let result = normalize_with_report(&records);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].category, "Food");
        assert_eq!(result.entries[1].category, "Travel");
        assert_eq!(result.entries[1].amount, Decimal::new(1025, 2));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&[]).is_empty());
    }
}
