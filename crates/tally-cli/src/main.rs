//! Tally CLI - Personal expense ledger with spending forecasts
//!
//! Usage:
//!   tally                                  Interactive menu
//!   tally add -c Food -a 12.50             Record an expense (today)
//!   tally view --daily                     List expenses and totals
//!   tally predict --days 14                Forecast daily spending

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so report output (including --json) stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.ledger.as_deref())?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let ledger = commands::open_ledger(&config)?;
            commands::cmd_menu(&ledger)
        }
        Some(Commands::Add {
            date,
            category,
            amount,
            notes,
        }) => {
            let ledger = commands::open_ledger(&config)?;
            commands::cmd_add(&ledger, date.as_deref(), &category, &amount, &notes)
        }
        Some(Commands::View { daily, json }) => {
            let ledger = commands::open_ledger(&config)?;
            commands::cmd_view(&ledger, daily, json)
        }
        Some(Commands::Predict { days, json }) => {
            let ledger = commands::open_ledger(&config)?;
            let days = days.unwrap_or(config.default_forecast_days);
            commands::cmd_predict(&ledger, days, json)
        }
        Some(Commands::Config) => commands::cmd_config(&config),
    }
}
