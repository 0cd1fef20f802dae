use quiz_core::model::{Phase, QuestionRecord};

/// Lives a new session starts with.
pub const STARTING_LIVES: u32 = 3;
/// Points awarded per correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

/// All mutable state of one quiz session.
///
/// Only `QuizSession` mutates it; `Default` is the login state a restart returns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) group: String,
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) q_idx: usize,
    pub(crate) questions: Vec<QuestionRecord>,
    pub(crate) hint_active: bool,
    // Memoized for the current question; cleared on advance.
    pub(crate) hint_clue: Option<String>,
    pub(crate) options: Option<Vec<String>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Login,
            group: String::new(),
            score: 0,
            lives: STARTING_LIVES,
            q_idx: 0,
            questions: Vec::new(),
            hint_active: false,
            hint_clue: None,
            options: None,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn q_idx(&self) -> usize {
        self.q_idx
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn hint_active(&self) -> bool {
        self.hint_active
    }

    /// The question at `q_idx`, if any remain.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.q_idx)
    }

    /// True when play cannot continue: no lives left or no questions left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.lives == 0 || self.q_idx >= self.questions.len()
    }

    pub(crate) fn clear_question_memo(&mut self) {
        self.hint_active = false;
        self.hint_clue = None;
        self.options = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fresh_login_state() {
        let state = SessionState::default();
        assert_eq!(state.phase(), Phase::Login);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.score(), 0);
        assert_eq!(state.q_idx(), 0);
        assert!(state.questions().is_empty());
        assert!(!state.hint_active());
        assert!(state.is_exhausted());
    }
}
