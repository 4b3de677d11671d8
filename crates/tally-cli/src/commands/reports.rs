//! Report command implementations (view, predict)

use std::io::{self, Write};

use anyhow::{Context, Result};
use tally_core::{
    build_forecast, Error, ExpenseReport, ForecastReport, Ledger, RawRecord, RecordStore,
    DATE_FORMAT,
};

use super::truncate;

pub const NO_EXPENSES: &str = "No expenses recorded yet!";
pub const NO_TRAINING_DATA: &str = "No data available to train the model.";
pub const NEED_TWO_DAYS: &str = "Need at least 2 different days of data to predict.";

pub fn write_view<W: Write>(out: &mut W, report: &ExpenseReport, daily: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📒 All expenses")?;
    writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    )?;
    writeln!(
        out,
        "   {:10} │ {:18} │ {:>10} │ Notes",
        "Date", "Category", "Amount"
    )?;
    writeln!(out, "   ───────────┼────────────────────┼────────────┼──────────")?;

    for entry in &report.entries {
        writeln!(
            out,
            "   {:10} │ {:18} │ {:>10.2} │ {}",
            entry.date.format(DATE_FORMAT).to_string(),
            truncate(&entry.category, 18),
            entry.amount,
            truncate(&entry.notes, 40)
        )?;
    }

    if daily {
        writeln!(out)?;
        writeln!(out, "📅 Daily totals")?;
        writeln!(out, "   {:10} │ {:>5} │ {:>10}", "Date", "Day", "Amount")?;
        writeln!(out, "   ───────────┼───────┼────────────")?;
        for day in &report.daily {
            writeln!(
                out,
                "   {:10} │ {:>5} │ {:>10.2}",
                day.date.format(DATE_FORMAT).to_string(),
                day.day_index,
                day.amount
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total expenses: {:.2}", report.total)?;

    if report.skipped > 0 {
        writeln!(
            out,
            "⚠️  {} unparsable row(s) in the ledger were skipped",
            report.skipped
        )?;
    }
    Ok(())
}

pub fn write_forecast<W: Write>(out: &mut W, report: &ForecastReport) -> io::Result<()> {
    let direction = if report.model.slope > 0.0 {
        "📈"
    } else if report.model.slope < 0.0 {
        "📉"
    } else {
        "➡️"
    };

    writeln!(out)?;
    writeln!(
        out,
        "{} Trend: {:+.2} per day (fitted on {} days up to {})",
        direction,
        report.model.slope,
        report.observed_days,
        report.last_observed.format(DATE_FORMAT)
    )?;
    writeln!(out)?;
    writeln!(out, "Predicted future expenses:")?;
    writeln!(out)?;

    for point in &report.points {
        writeln!(
            out,
            "{} -> {:.2}",
            point.date.format(DATE_FORMAT),
            point.predicted_amount
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Total predicted: {:.2}", report.total_predicted)?;

    if report.skipped > 0 {
        writeln!(
            out,
            "⚠️  {} unparsable row(s) in the ledger were skipped",
            report.skipped
        )?;
    }
    Ok(())
}

/// Forecast a snapshot, writing the user-facing message for sparse data
///
/// Returns `Ok(None)` when there is nothing (or too little) to fit.
pub fn forecast_or_explain<W: Write>(
    out: &mut W,
    records: &[RawRecord],
    days: u32,
) -> Result<Option<ForecastReport>> {
    match build_forecast(records, days) {
        Ok(report) => Ok(Some(report)),
        Err(Error::NoData) => {
            writeln!(out, "{}", NO_TRAINING_DATA)?;
            Ok(None)
        }
        Err(Error::InsufficientData { .. }) => {
            writeln!(out, "{}", NEED_TWO_DAYS)?;
            Ok(None)
        }
        Err(e) => Err(e).context("Forecast failed"),
    }
}

pub fn cmd_view<S: RecordStore>(ledger: &Ledger<S>, daily: bool, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();

    let report = match ledger.view() {
        Ok(report) => report,
        Err(Error::NoData) => {
            writeln!(out, "{}", NO_EXPENSES)?;
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read ledger"),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_view(&mut out, &report, daily)?;
    }
    Ok(())
}

pub fn cmd_predict<S: RecordStore>(ledger: &Ledger<S>, days: u32, json: bool) -> Result<()> {
    let records = ledger
        .store()
        .read_all()
        .context("Failed to read ledger")?;

    let mut out = io::stdout().lock();
    let Some(report) = forecast_or_explain(&mut out, &records, days)? else {
        return Ok(());
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_forecast(&mut out, &report)?;
    }
    Ok(())
}
