//! Ledger configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path, if one is given (it must exist)
//! 2. The override in the data dir (~/.local/share/tally/config.toml)
//! 3. The embedded defaults (compiled into binary)
//!
//! Keys missing from a file fall back to the defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

const DEFAULT_LEDGER_PATH: &str = "expense.csv";
const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ledger CSV file
    pub ledger_path: PathBuf,
    /// Horizon used when none is given
    pub default_forecast_days: u32,
    pub source: ConfigSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            default_forecast_days: DEFAULT_FORECAST_DAYS,
            source: ConfigSource::Embedded,
        }
    }
}

impl Config {
    /// Load configuration using the layered resolution
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::from_file(&path);
        }

        debug!("Using embedded default config");
        parse_config(DEFAULT_CONFIG, ConfigSource::Embedded)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {}", path.display());
        parse_config(&content, ConfigSource::File(path.to_path_buf()))
    }

    /// Replace the ledger path (e.g. from a command-line flag)
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    ledger: Option<RawLedger>,
    forecast: Option<RawForecast>,
}

#[derive(Debug, Deserialize)]
struct RawLedger {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    default_days: Option<u32>,
}

fn parse_config(content: &str, source: ConfigSource) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    let ledger_path = raw
        .ledger
        .and_then(|l| l.path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));

    let default_forecast_days = raw
        .forecast
        .and_then(|f| f.default_days)
        .unwrap_or(DEFAULT_FORECAST_DAYS);
    if default_forecast_days == 0 {
        return Err(Error::Config(
            "forecast.default_days must be at least 1".to_string(),
        ));
    }

    Ok(Config {
        ledger_path,
        default_forecast_days,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG, ConfigSource::Embedded).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_falls_back() {
        let config = parse_config(
            "[forecast]\ndefault_days = 30\n",
            ConfigSource::Embedded,
        )
        .unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("expense.csv"));
        assert_eq!(config.default_forecast_days, 30);

        let config = parse_config("", ConfigSource::Embedded).unwrap();
        assert_eq!(config.default_forecast_days, 7);
    }

    #[test]
    fn test_zero_default_days_rejected() {
        let result = parse_config("[forecast]\ndefault_days = 0\n", ConfigSource::Embedded);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse_config("[ledger\npath = 3", ConfigSource::Embedded);
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.toml");
        fs::write(&path, "[ledger]\npath = \"/tmp/spend.csv\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/spend.csv"));
        assert_eq!(config.source, ConfigSource::File(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_with_ledger_path() {
        let config = Config::default().with_ledger_path("other.csv");
        assert_eq!(config.ledger_path, PathBuf::from("other.csv"));
    }
}
