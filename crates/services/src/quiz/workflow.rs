use std::sync::Arc;

use tracing::debug;

use super::service::{QuizSession, normalize_group};
use crate::catalog::QuestionCatalog;
use crate::error::QuizError;
use quiz_core::model::Phase;

/// Orchestrates the one asynchronous step of a session: fetching questions on login.
#[derive(Clone)]
pub struct QuizLoopService {
    catalog: Arc<QuestionCatalog>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuestionCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Submit the login form.
    ///
    /// A blank name is silently ignored (`Ok(false)`) and nothing is fetched.
    /// Otherwise questions are loaded through the catalog and the session
    /// starts playing (`Ok(true)`).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::DataSource` if the questions cannot be fetched; the
    /// session stays in login. Returns `QuizError::WrongPhase` outside login.
    pub async fn submit_group(
        &self,
        session: &mut QuizSession,
        name: &str,
    ) -> Result<bool, QuizError> {
        session.require_phase(Phase::Login, "submit a group")?;
        let Some(group) = normalize_group(name) else {
            debug!("ignoring blank group name");
            return Ok(false);
        };

        let questions = self.catalog.questions().await?;
        session.begin(group, questions)
    }
}
