use std::sync::Arc;
use std::time::Duration;

use quiz_core::Clock;
use storage::repository::QuestionSource;
use storage::sheet::SheetSource;
use storage::sqlite::SqliteRepository;
use tracing::info;

use crate::catalog::QuestionCatalog;
use crate::config::{SourceConfig, SourceLocator};
use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;

/// Assembles app-facing services around the configured question source.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<QuestionCatalog>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services for the configured source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client or the `SQLite` store
    /// cannot be initialized.
    pub async fn from_config(config: &SourceConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let source: Arc<dyn QuestionSource> = match &config.locator {
            SourceLocator::Sheet(url) => Arc::new(SheetSource::new(url, config.fetch_timeout)?),
            SourceLocator::Sqlite(url) => Arc::new(SqliteRepository::open(url).await?),
        };
        info!(
            source = %source.describe(),
            refresh_secs = config.refresh_window.as_secs(),
            "question source ready"
        );
        Ok(Self::with_source(source, config.refresh_window, clock))
    }

    #[must_use]
    pub fn with_source(
        source: Arc<dyn QuestionSource>,
        refresh_window: Duration,
        clock: Clock,
    ) -> Self {
        let catalog =
            Arc::new(QuestionCatalog::new(source, clock).with_refresh_window(refresh_window));
        let quiz_loop = Arc::new(QuizLoopService::new(Arc::clone(&catalog)));
        Self { catalog, quiz_loop }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuestionCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
