//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("No data available")]
    NoData,

    #[error("Need at least 2 different days of data, found {days}")]
    InsufficientData { days: usize },

    #[error("Forecast horizon must be at least 1 day, got {0}")]
    InvalidHorizon(u32),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    /// True for failures of the underlying ledger medium
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
