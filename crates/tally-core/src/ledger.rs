//! Ledger service: recording expenses, totals and forecasts
//!
//! Every query reads a fresh snapshot of the store and recomputes the whole
//! pipeline (normalize → aggregate → fit → forecast). Nothing is cached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::{aggregate, checked_sum, grand_total};
use crate::error::{Error, Result};
use crate::forecast::forecast;
use crate::models::{DailyTotal, Entry, ForecastPoint, RawRecord, DATE_FORMAT};
use crate::normalize::{normalize_with_report, parse_record};
use crate::store::RecordStore;
use crate::trend::TrendModel;

/// Everything recorded so far
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    /// Valid entries in chronological order (same-day entries keep file order)
    pub entries: Vec<Entry>,
    pub daily: Vec<DailyTotal>,
    /// Sum of all daily totals
    pub total: Decimal,
    /// Stored rows that failed to parse
    pub skipped: usize,
}

/// Projected daily spending
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub model: TrendModel,
    /// Number of distinct days the model was fitted on
    pub observed_days: usize,
    pub last_observed: NaiveDate,
    pub points: Vec<ForecastPoint>,
    /// Sum of all predicted amounts
    pub total_predicted: Decimal,
    pub skipped: usize,
}

/// Build the view report from raw records
///
/// Fails with [`Error::NoData`] when no record survives normalization.
pub fn build_report(records: &[RawRecord]) -> Result<ExpenseReport> {
    let normalized = normalize_with_report(records);
    if normalized.skipped > 0 {
        warn!("Skipped {} unparsable ledger rows", normalized.skipped);
    }
    if normalized.entries.is_empty() {
        return Err(Error::NoData);
    }

    let daily = aggregate(&normalized.entries)?;
    let total = grand_total(&daily)?;

    let mut entries = normalized.entries;
    entries.sort_by_key(|e| e.date);

    Ok(ExpenseReport {
        entries,
        daily,
        total,
        skipped: normalized.skipped,
    })
}

/// Run the full forecasting pipeline over raw records
///
/// Short-circuits with [`Error::NoData`] (nothing valid recorded) or
/// [`Error::InsufficientData`] (fewer than two distinct days).
pub fn build_forecast(records: &[RawRecord], horizon_days: u32) -> Result<ForecastReport> {
    let normalized = normalize_with_report(records);
    if normalized.skipped > 0 {
        warn!("Skipped {} unparsable ledger rows", normalized.skipped);
    }
    if normalized.entries.is_empty() {
        return Err(Error::NoData);
    }

    let daily = aggregate(&normalized.entries)?;
    let model = TrendModel::fit(&daily)?;
    let points = forecast(&daily, &model, horizon_days)?;
    let total_predicted = checked_sum(
        points.iter().map(|p| p.predicted_amount),
        "total predicted amount",
    )?;

    let last_observed = daily.last().map(|d| d.date).ok_or(Error::NoData)?;

    Ok(ForecastReport {
        model,
        observed_days: daily.len(),
        last_observed,
        points,
        total_predicted,
        skipped: normalized.skipped,
    })
}

/// Expense ledger backed by a record store
pub struct Ledger<S> {
    store: S,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and record a new expense
    ///
    /// Unlike normalization, invalid input is an error here: nothing that
    /// fails to parse is ever written. The stored row uses the canonical
    /// textual form of the parsed entry.
    pub fn add(&self, record: &RawRecord) -> Result<Entry> {
        let entry = parse_record(record).map_err(|e| Error::InvalidRecord(e.to_string()))?;
        self.store.append(&entry.to_raw())?;

        info!(
            "Recorded {} {} on {}",
            entry.category,
            entry.amount,
            entry.date.format(DATE_FORMAT)
        );
        Ok(entry)
    }

    /// All valid entries with daily totals and the grand total
    pub fn view(&self) -> Result<ExpenseReport> {
        build_report(&self.store.read_all()?)
    }

    /// Forecast the next `horizon_days` days of spending
    pub fn predict(&self, horizon_days: u32) -> Result<ForecastReport> {
        build_forecast(&self.store.read_all()?, horizon_days)
    }
}
