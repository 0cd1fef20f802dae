mod hint;
mod options;
mod service;
mod state;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use options::{DISTRACTOR_COUNT, build_options};
pub use service::{QuizSession, normalize_group};
pub use state::{POINTS_PER_CORRECT, STARTING_LIVES, SessionState};
pub use view::{AnswerOutcome, HintView, QuestionView, QuizSnapshot};
pub use workflow::QuizLoopService;
