//! Tally Core Library
//!
//! Shared functionality for the Tally expense ledger:
//! - Append-only ledger storage (CSV file or in-memory)
//! - Normalization of stored rows into typed entries
//! - Daily aggregation and a least-squares spending trend
//! - Forecasting of near-future daily spending
//! - Layered TOML configuration

pub mod aggregate;
pub mod config;
pub mod error;
pub mod forecast;
pub mod ledger;
pub mod models;
pub mod normalize;
pub mod store;
pub mod trend;

pub use aggregate::{aggregate, grand_total};
pub use config::{Config, ConfigSource};
pub use error::{Error, Result};
pub use forecast::forecast;
pub use ledger::{build_forecast, build_report, ExpenseReport, ForecastReport, Ledger};
pub use models::{DailyTotal, Entry, ForecastPoint, RawRecord, DATE_FORMAT};
pub use normalize::{normalize, normalize_with_report, Normalized, RowError};
pub use store::{CsvRecordStore, MemoryRecordStore, RecordStore};
pub use trend::TrendModel;
