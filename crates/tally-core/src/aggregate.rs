//! Daily aggregation of entries into an indexed time series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{DailyTotal, Entry};

/// Group entries by date, sum each day, and index days from the earliest one
///
/// Days without entries produce no `DailyTotal`; indices stay tied to the
/// calendar, so gaps show up as jumps in `day_index`. A day whose sum does
/// not fit in a `Decimal` is an [`Error::OutOfRange`].
pub fn aggregate(entries: &[Entry]) -> Result<Vec<DailyTotal>> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for entry in entries {
        let sum = by_date.entry(entry.date).or_insert(Decimal::ZERO);
        *sum = sum
            .checked_add(entry.amount)
            .ok_or_else(|| Error::OutOfRange(format!("daily total on {}", entry.date)))?;
    }

    let Some(&first) = by_date.keys().next() else {
        return Ok(Vec::new());
    };

    let daily: Vec<DailyTotal> = by_date
        .into_iter()
        .map(|(date, amount)| DailyTotal {
            date,
            amount,
            day_index: (date - first).num_days(),
        })
        .collect();

    debug!(
        "Aggregated {} entries into {} daily totals",
        entries.len(),
        daily.len()
    );
    Ok(daily)
}

/// Sum of every daily total
pub fn grand_total(daily: &[DailyTotal]) -> Result<Decimal> {
    checked_sum(daily.iter().map(|d| d.amount), "grand total")
}

/// Overflow-checked sum; `what` names the quantity in the error
pub(crate) fn checked_sum(
    amounts: impl IntoIterator<Item = Decimal>,
    what: &str,
) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| Error::OutOfRange(what.to_string()))
}
