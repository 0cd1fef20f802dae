//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::Phase;
use storage::repository::DataSourceError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by quiz session transitions.
///
/// A failed transition leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("not enough other ragas to build options for {raga} (found {available}, need 3)")]
    InsufficientDistractors { raga: String, available: usize },

    #[error("cannot {action} while the session is in {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("no current question")]
    NoCurrentQuestion,
}

/// Errors emitted while reading source configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unsupported question source: {raw} (expected http(s):// or sqlite:)")]
    UnsupportedSource { raw: String },

    #[error("invalid {name} value: {raw}")]
    InvalidSeconds { name: &'static str, raw: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}
