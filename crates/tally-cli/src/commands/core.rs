//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve configuration plus command-line overrides
//! - `open_ledger` - Shared utility to open the ledger file
//! - `cmd_config` - Show the resolved configuration

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{Config, CsvRecordStore, Ledger};
use tracing::debug;

/// Load configuration, applying the --ledger override if given
pub fn load_config(config_path: Option<&Path>, ledger_override: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    Ok(match ledger_override {
        Some(path) => config.with_ledger_path(path),
        None => config,
    })
}

/// Open the configured ledger, creating the file if needed
pub fn open_ledger(config: &Config) -> Result<Ledger<CsvRecordStore>> {
    let store = CsvRecordStore::open(&config.ledger_path).with_context(|| {
        format!("Failed to open ledger {}", config.ledger_path.display())
    })?;
    debug!(
        "Using ledger {} (config: {})",
        config.ledger_path.display(),
        config.source
    );
    Ok(Ledger::new(store))
}

pub fn cmd_config(config: &Config) -> Result<()> {
    println!();
    println!("⚙️  Configuration");
    println!("   ─────────────────────────────");
    println!("   Source:        {}", config.source);
    println!("   Ledger:        {}", config.ledger_path.display());
    println!("   Forecast days: {}", config.default_forecast_days);
    if let Some(path) = tally_core::config::default_config_path() {
        println!();
        println!("   Override file: {}", path.display());
    }
    Ok(())
}
