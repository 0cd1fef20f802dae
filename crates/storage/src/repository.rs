use async_trait::async_trait;
use quiz_core::model::{QuestionError, QuestionRecord};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by question sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataSourceError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("question source timed out after {0:?}")]
    Timeout(Duration),

    #[error("question source responded with status {0}")]
    HttpStatus(u16),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("question source is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("question source returned no usable questions")]
    NoQuestions,
}

/// Columns every tabular question source must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["raga", "notation", "clues"];

/// Contract for anything that can hand out the full list of quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every question in source order.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if the source cannot be read, is structurally
    /// malformed, or yields no valid rows.
    async fn fetch(&self) -> Result<Vec<QuestionRecord>, DataSourceError>;

    /// Short human-readable locator, used in logs.
    fn describe(&self) -> String;
}

/// A row as read from a source, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawQuestionRow {
    /// 1-based position in the source, for diagnostics.
    pub line: usize,
    pub raga: Option<String>,
    pub notation: Option<String>,
    pub clues: Option<String>,
}

/// Validate raw rows, dropping (and logging) the ones with missing fields.
///
/// # Errors
///
/// Returns `DataSourceError::NoQuestions` when nothing survives validation.
pub fn keep_valid_rows(
    origin: &str,
    rows: impl IntoIterator<Item = RawQuestionRow>,
) -> Result<Vec<QuestionRecord>, DataSourceError> {
    let mut kept = Vec::new();
    let mut skipped = 0_usize;

    for row in rows {
        match QuestionRecord::from_columns(row.raga, row.notation, row.clues) {
            Ok(record) => kept.push(record),
            Err(err) => {
                skipped += 1;
                log_skipped_row(origin, row.line, &err);
            }
        }
    }

    if skipped > 0 {
        warn!(origin, skipped, kept = kept.len(), "excluded malformed question rows");
    }
    if kept.is_empty() {
        return Err(DataSourceError::NoQuestions);
    }
    Ok(kept)
}

fn log_skipped_row(origin: &str, line: usize, err: &QuestionError) {
    warn!(origin, line, error = %err, "skipping question row");
}

/// Simple in-memory source for tests and prototyping.
///
/// Counts how often it was fetched so caching layers can be checked.
#[derive(Clone, Default)]
pub struct InMemoryQuestionSource {
    rows: Arc<Vec<QuestionRecord>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(rows: Vec<QuestionRecord>) -> Self {
        Self {
            rows: Arc::new(rows),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch(&self) -> Result<Vec<QuestionRecord>, DataSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.rows.is_empty() {
            return Err(DataSourceError::NoQuestions);
        }
        Ok(self.rows.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raga: &str) -> QuestionRecord {
        QuestionRecord::new(raga, "S R G M P D N S'", "clue one;clue two").unwrap()
    }

    fn raw(line: usize, raga: Option<&str>, notation: Option<&str>, clues: Option<&str>) -> RawQuestionRow {
        RawQuestionRow {
            line,
            raga: raga.map(str::to_owned),
            notation: notation.map(str::to_owned),
            clues: clues.map(str::to_owned),
        }
    }

    #[test]
    fn malformed_rows_are_excluded() {
        let rows = vec![
            raw(2, Some("Yaman"), Some("N R G"), Some("evening")),
            raw(3, None, Some("S R G"), Some("x")),
            raw(4, Some("Bhairav"), Some(" "), Some("dawn")),
            raw(5, Some("Kafi"), Some("S R g m"), Some("folk")),
        ];

        let kept = keep_valid_rows("test", rows).unwrap();
        let ragas: Vec<_> = kept.iter().map(QuestionRecord::raga).collect();
        assert_eq!(ragas, vec!["Yaman", "Kafi"]);
    }

    #[test]
    fn all_rows_malformed_is_an_error() {
        let rows = vec![raw(2, Some("Yaman"), None, None)];
        assert_eq!(
            keep_valid_rows("test", rows).unwrap_err(),
            DataSourceError::NoQuestions
        );
    }

    #[tokio::test]
    async fn in_memory_source_counts_fetches() {
        let source = InMemoryQuestionSource::new(vec![record("Yaman"), record("Bhairav")]);

        let first = source.fetch().await.unwrap();
        let second = source.fetch().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn empty_in_memory_source_reports_no_questions() {
        let source = InMemoryQuestionSource::default();
        assert_eq!(source.fetch().await.unwrap_err(), DataSourceError::NoQuestions);
    }
}
