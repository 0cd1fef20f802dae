use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::QuestionRecord;
use storage::repository::{DataSourceError, QuestionSource};
use tracing::debug;

/// How long a fetched question list is reused before the source is queried again.
pub const DEFAULT_REFRESH_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedQuestions {
    fetched_at: DateTime<Utc>,
    questions: Arc<Vec<QuestionRecord>>,
}

/// Question source wrapper that reuses results within a refresh window.
///
/// Failed fetches are never cached.
pub struct QuestionCatalog {
    source: Arc<dyn QuestionSource>,
    clock: Clock,
    refresh_window: Duration,
    cache: Mutex<Option<CachedQuestions>>,
}

impl QuestionCatalog {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, clock: Clock) -> Self {
        Self {
            source,
            clock,
            refresh_window: DEFAULT_REFRESH_WINDOW,
            cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_refresh_window(mut self, window: Duration) -> Self {
        self.refresh_window = window;
        self
    }

    #[must_use]
    pub fn refresh_window(&self) -> Duration {
        self.refresh_window
    }

    #[must_use]
    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// Return the question list, querying the source only when the cache is stale.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if the source has to be queried and fails.
    pub async fn questions(&self) -> Result<Vec<QuestionRecord>, DataSourceError> {
        if let Some(cached) = self.fresh_entry() {
            debug!(source = %self.source.describe(), "question cache hit");
            return Ok(cached.as_ref().clone());
        }

        debug!(source = %self.source.describe(), "question cache miss");
        let requested_at = self.clock.now();
        let questions = Arc::new(self.source.fetch().await?);
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedQuestions {
            fetched_at: requested_at,
            questions: Arc::clone(&questions),
        });
        Ok(questions.as_ref().clone())
    }

    /// Drop any cached questions so the next call hits the source.
    pub fn invalidate(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn fresh_entry(&self) -> Option<Arc<Vec<QuestionRecord>>> {
        let guard = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let cached = guard.as_ref()?;
        let age = self
            .clock
            .elapsed_since(cached.fetched_at)
            .to_std()
            .unwrap_or_default();
        (age < self.refresh_window).then(|| Arc::clone(&cached.questions))
    }
}
