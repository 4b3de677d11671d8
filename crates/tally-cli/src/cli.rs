//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track expenses and see where your spending is heading
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal expense ledger with spending forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger CSV file (overrides the configured path)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Config file
    ///
    /// Defaults to ~/.local/share/tally/config.toml when present,
    /// otherwise the built-in defaults are used.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (add, view, predict)
    Menu,

    /// Record an expense
    Add {
        /// Date as dd/mm/yyyy (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category (e.g. Groceries)
        #[arg(short, long)]
        category: String,

        /// Amount as a plain number (e.g. 100 or 99.50)
        #[arg(short, long)]
        amount: String,

        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List all expenses with the grand total
    View {
        /// Also show per-day totals
        #[arg(long)]
        daily: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict daily spending for the coming days
    Predict {
        /// Number of future days (defaults to forecast.default_days)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration
    Config,
}
