#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod config;
pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use catalog::{DEFAULT_REFRESH_WINDOW, QuestionCatalog};
pub use config::{SourceConfig, SourceLocator};
pub use error::{AppServicesError, ConfigError, QuizError};
pub use quiz::{
    AnswerOutcome, HintView, QuestionView, QuizLoopService, QuizSession, QuizSnapshot,
};
