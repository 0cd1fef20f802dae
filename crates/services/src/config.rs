use std::env;
use std::time::Duration;

use storage::sheet::DEFAULT_FETCH_TIMEOUT;

use crate::catalog::DEFAULT_REFRESH_WINDOW;
use crate::error::ConfigError;

pub const SOURCE_VAR: &str = "RAGA_SOURCE";
pub const REFRESH_SECS_VAR: &str = "RAGA_REFRESH_SECS";
pub const FETCH_TIMEOUT_SECS_VAR: &str = "RAGA_FETCH_TIMEOUT_SECS";

pub const DEFAULT_SOURCE: &str = "sqlite://raga.sqlite3?mode=rwc";

/// Where questions come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocator {
    /// A sheet published as CSV over HTTP(S).
    Sheet(String),
    /// A `SQLite` database URL.
    Sqlite(String),
}

impl SourceLocator {
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedSource` for anything that is not an
    /// `http(s)://` or `sqlite:` locator.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(Self::Sheet(trimmed.to_owned()))
        } else if trimmed.starts_with("sqlite:") {
            Ok(Self::Sqlite(trimmed.to_owned()))
        } else {
            Err(ConfigError::UnsupportedSource {
                raw: raw.to_owned(),
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub locator: SourceLocator,
    pub refresh_window: Duration,
    pub fetch_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            locator: SourceLocator::Sqlite(DEFAULT_SOURCE.to_owned()),
            refresh_window: DEFAULT_REFRESH_WINDOW,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Read `RAGA_SOURCE`, `RAGA_REFRESH_SECS` and `RAGA_FETCH_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(SOURCE_VAR).filter(|v| !v.trim().is_empty()) {
            config.locator = SourceLocator::parse(&raw)?;
        }
        if let Some(raw) = lookup(REFRESH_SECS_VAR) {
            config.refresh_window = parse_seconds(REFRESH_SECS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(FETCH_TIMEOUT_SECS_VAR) {
            config.fetch_timeout = parse_seconds(FETCH_TIMEOUT_SECS_VAR, &raw)?;
        }

        Ok(config)
    }
}

/// Parse a whole number of seconds.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSeconds` if `raw` is not a non-negative integer.
pub fn parse_seconds(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSeconds {
            name,
            raw: raw.to_owned(),
        })
}
