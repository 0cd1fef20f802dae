#![forbid(unsafe_code)]

pub mod repository;
pub mod sheet;
pub mod sqlite;

pub use repository::{DataSourceError, InMemoryQuestionSource, QuestionSource};
