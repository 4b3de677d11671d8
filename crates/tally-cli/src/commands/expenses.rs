//! Expense recording command

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::{Ledger, RawRecord, RecordStore, DATE_FORMAT};

/// Today's date in ledger format
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn cmd_add<S: RecordStore>(
    ledger: &Ledger<S>,
    date: Option<&str>,
    category: &str,
    amount: &str,
    notes: &str,
) -> Result<()> {
    let date = date.map(str::to_string).unwrap_or_else(today);
    let record = RawRecord::new(date, category, amount, notes);

    let entry = ledger.add(&record).context("Expense not recorded")?;

    println!(
        "✅ Expense added: {} {:.2} on {}",
        entry.category,
        entry.amount,
        entry.date.format(DATE_FORMAT)
    );
    Ok(())
}
