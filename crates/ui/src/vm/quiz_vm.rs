use quiz_core::model::Phase;
use services::{QuestionView, QuizError, QuizSession, QuizSnapshot};
use tracing::warn;

use crate::views::ViewError;

/// Feedback shown above the current screen after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Correct,
    Wrong { correct_raga: String },
    Skipped { raga: String },
    Error(ViewError),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::Correct => "Correct!".to_owned(),
            Notice::Wrong { correct_raga } => format!("Wrong Raga! It was {correct_raga}."),
            Notice::Skipped { raga } => {
                format!("Skipped a {raga} question: not enough other ragas to choose from.")
            }
            Notice::Error(err) => err.message().to_owned(),
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        matches!(self, Notice::Correct)
    }
}

/// What the quiz view should draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Login { pending: bool },
    Playing {
        snapshot: QuizSnapshot,
        question: QuestionView,
    },
    GameOver { snapshot: QuizSnapshot },
}

/// Wraps a `QuizSession` and keeps a ready-to-render screen.
///
/// Every action refreshes the screen, so rendering only ever reads.
pub struct QuizVm {
    session: QuizSession,
    screen: QuizScreen,
    notice: Option<Notice>,
    pending: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::from_session(QuizSession::new())
    }

    #[must_use]
    pub fn from_session(session: QuizSession) -> Self {
        let mut vm = Self {
            session,
            screen: QuizScreen::Login { pending: false },
            notice: None,
            pending: false,
        };
        vm.refresh();
        vm
    }

    #[must_use]
    pub fn screen(&self) -> &QuizScreen {
        &self.screen
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Move the session out for the async login step.
    ///
    /// The VM shows a pending login screen until `finish_login` puts it back.
    /// Returns `None` while a login is already in flight.
    pub fn take_session(&mut self) -> Option<QuizSession> {
        if self.pending {
            return None;
        }
        self.pending = true;
        self.notice = None;
        let session = std::mem::take(&mut self.session);
        self.refresh();
        Some(session)
    }

    pub fn finish_login(&mut self, session: QuizSession, result: Result<bool, QuizError>) {
        self.session = session;
        self.pending = false;
        if let Err(err) = result {
            warn!(error = %err, "login failed");
            self.notice = Some(Notice::Error(ViewError::from_quiz(&err)));
        }
        self.refresh();
    }

    pub fn activate_hint(&mut self) {
        if let Err(err) = self.session.activate_hint() {
            self.notice = Some(Notice::Error(ViewError::from_quiz(&err)));
        }
        self.refresh();
    }

    pub fn submit_answer(&mut self, choice: &str) {
        self.notice = Some(match self.session.submit_answer(choice) {
            Ok(outcome) if outcome.correct => Notice::Correct,
            Ok(outcome) => Notice::Wrong {
                correct_raga: outcome.correct_raga,
            },
            Err(err) => Notice::Error(ViewError::from_quiz(&err)),
        });
        self.refresh();
    }

    pub fn restart(&mut self) {
        match self.session.restart() {
            Ok(()) => self.notice = None,
            Err(err) => self.notice = Some(Notice::Error(ViewError::from_quiz(&err))),
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.screen = loop {
            match self.session.current_view() {
                Ok(Some(question)) => {
                    break QuizScreen::Playing {
                        snapshot: self.session.snapshot(),
                        question,
                    };
                }
                Ok(None) => break self.idle_screen(),
                Err(QuizError::InsufficientDistractors { raga, .. }) => {
                    self.notice = Some(Notice::Skipped { raga });
                    if self.session.skip_current().is_err() {
                        break self.idle_screen();
                    }
                }
                Err(err) => {
                    self.notice = Some(Notice::Error(ViewError::from_quiz(&err)));
                    break self.idle_screen();
                }
            }
        };
    }

    fn idle_screen(&self) -> QuizScreen {
        match self.session.phase() {
            Phase::Login => QuizScreen::Login {
                pending: self.pending,
            },
            Phase::Playing | Phase::GameOver => QuizScreen::GameOver {
                snapshot: self.session.snapshot(),
            },
        }
    }
}

impl Default for QuizVm {
    fn default() -> Self {
        Self::new()
    }
}
