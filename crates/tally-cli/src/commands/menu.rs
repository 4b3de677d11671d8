//! Interactive menu
//!
//! Re-prompts until each answer is valid, so nothing malformed reaches the
//! ledger. End of input exits cleanly.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tally_core::normalize::{parse_amount, parse_date};
use tally_core::{Error, Ledger, RawRecord, RecordStore};

use super::reports::{forecast_or_explain, write_forecast, write_view, NO_EXPENSES};

const MENU: &str = "
--- Expense Tracker ---
1. Add expense
2. View expenses
3. Predict future expenses
4. Exit";

pub fn cmd_menu<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_menu(ledger, &mut input, &mut out)
}

/// Run the menu loop until the user exits or input ends
pub fn run_menu<S, R, W>(ledger: &Ledger<S>, input: &mut R, out: &mut W) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Choose an option: ")? else {
            writeln!(out)?;
            writeln!(out, "Goodbye!")?;
            return Ok(());
        };

        let outcome = match choice.as_str() {
            "1" => add_expense(ledger, input, out),
            "2" => view_expenses(ledger, out),
            "3" => predict_expenses(ledger, input, out),
            "4" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(out, "Invalid option. Try again.")?;
                Ok(Flow::Continue)
            }
        };

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::EndOfInput) => {
                writeln!(out)?;
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            // A failed request is reported, the session goes on
            Err(e) => writeln!(out, "❌ {:#}", e)?,
        }
    }
}

enum Flow {
    Continue,
    EndOfInput,
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until `parse` accepts the answer; `None` at end of input
fn prompt_until<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    label: &str,
    retry_message: &str,
    parse: F,
) -> Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Option<T>,
{
    loop {
        let Some(answer) = prompt(input, out, label)? else {
            return Ok(None);
        };
        if let Some(value) = parse(&answer) {
            return Ok(Some(value));
        }
        writeln!(out, "{}", retry_message)?;
    }
}

/// Positive whole number of days
fn parse_days(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&d| d > 0)
}

fn add_expense<S, R, W>(ledger: &Ledger<S>, input: &mut R, out: &mut W) -> Result<Flow>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    let Some(date) = prompt_until(
        input,
        out,
        "Date (dd/mm/yyyy): ",
        "Invalid date format. Please use dd/mm/yyyy.",
        |s| parse_date(s).ok().map(|_| s.to_string()),
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let Some(category) = prompt(input, out, "Category: ")? else {
        return Ok(Flow::EndOfInput);
    };

    let Some(amount) = prompt_until(
        input,
        out,
        "Amount: ",
        "Enter a valid number (like 100 or 99.50)",
        |s| parse_amount(s).ok().map(|_| s.to_string()),
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let Some(notes) = prompt(input, out, "Notes: ")? else {
        return Ok(Flow::EndOfInput);
    };

    ledger
        .add(&RawRecord::new(date, category, amount, notes))
        .context("Failed to save expense")?;
    writeln!(out, "Expense added successfully!")?;
    Ok(Flow::Continue)
}

fn view_expenses<S: RecordStore, W: Write>(ledger: &Ledger<S>, out: &mut W) -> Result<Flow> {
    match ledger.view() {
        Ok(report) => write_view(out, &report, false)?,
        Err(Error::NoData) => writeln!(out, "{}", NO_EXPENSES)?,
        Err(e) => return Err(e).context("Failed to read ledger"),
    }
    Ok(Flow::Continue)
}

fn predict_expenses<S, R, W>(ledger: &Ledger<S>, input: &mut R, out: &mut W) -> Result<Flow>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    // One snapshot for both the data check and the forecast
    let records = ledger
        .store()
        .read_all()
        .context("Failed to read ledger")?;

    // Check the data before asking for a horizon
    if forecast_or_explain(out, &records, 1)?.is_none() {
        return Ok(Flow::Continue);
    }

    let Some(days) = prompt_until(
        input,
        out,
        "How many future days to predict? ",
        "Enter a positive whole number (like 7 or 30).",
        parse_days,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    if let Some(report) = forecast_or_explain(out, &records, days)? {
        write_forecast(out, &report)?;
    }
    Ok(Flow::Continue)
}
