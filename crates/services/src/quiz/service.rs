use std::fmt;

use quiz_core::model::{Phase, QuestionRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use super::hint::pick_clue;
use super::options::build_options;
use super::state::{POINTS_PER_CORRECT, STARTING_LIVES, SessionState};
use super::view::{AnswerOutcome, HintView, QuestionView, QuizSnapshot};
use crate::error::QuizError;

/// One isolated quiz session: `login -> playing -> game_over`, then restart.
///
/// Every transition either applies fully or returns an error and leaves the
/// state as it was. After each transition the playing guard runs, so a
/// session in `Playing` always has a current question and at least one life.
pub struct QuizSession {
    state: SessionState,
    rng: StdRng,
}

impl QuizSession {
    /// New session in the login phase, with an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// New session with a deterministic RNG. Meant for tests and replays.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: SessionState::default(),
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.state.phase,
            group: self.state.group.clone(),
            score: self.state.score,
            lives: self.state.lives,
            max_lives: STARTING_LIVES,
            question_number: self.state.q_idx + 1,
            total_questions: self.state.questions.len(),
            hint_active: self.state.hint_active,
        }
    }

    /// The question being asked, only while playing.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.state.phase == Phase::Playing {
            self.state.current_question()
        } else {
            None
        }
    }

    /// Start playing with an already fetched question list.
    ///
    /// A blank group name is ignored and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside the login phase.
    pub fn begin(
        &mut self,
        group: &str,
        mut questions: Vec<QuestionRecord>,
    ) -> Result<bool, QuizError> {
        self.require_phase(Phase::Login, "submit a group")?;
        let Some(group) = normalize_group(group) else {
            return Ok(false);
        };

        questions.shuffle(&mut self.rng);
        info!(group, questions = questions.len(), "quiz session started");

        self.state.group = group.to_owned();
        self.state.questions = questions;
        self.state.phase = Phase::Playing;
        self.apply_guard();
        Ok(true)
    }

    /// Reveal the notation and one clue for the current question.
    ///
    /// Idempotent: the clue is chosen on first activation and kept until the
    /// question advances.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside the playing phase.
    pub fn activate_hint(&mut self) -> Result<HintView, QuizError> {
        self.require_phase(Phase::Playing, "activate a hint")?;
        let question = self
            .state
            .current_question()
            .ok_or(QuizError::NoCurrentQuestion)?;

        if !self.state.hint_active {
            let clue = pick_clue(question, &mut self.rng);
            self.state.hint_clue = clue;
            self.state.hint_active = true;
        }

        self.hint().ok_or(QuizError::NoCurrentQuestion)
    }

    /// The revealed hint, if the hint is active.
    #[must_use]
    pub fn hint(&self) -> Option<HintView> {
        if !self.state.hint_active {
            return None;
        }
        let question = self.current_question()?;
        Some(HintView {
            notation: question.notation().to_owned(),
            clue: self.state.hint_clue.clone(),
        })
    }

    /// Answer choices for the current question, stable until it advances.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientDistractors` if the question list has
    /// fewer than three other ragas, or `QuizError::WrongPhase` outside play.
    pub fn options(&mut self) -> Result<Vec<String>, QuizError> {
        self.require_phase(Phase::Playing, "list options")?;
        if let Some(options) = &self.state.options {
            return Ok(options.clone());
        }

        let current = self
            .state
            .current_question()
            .ok_or(QuizError::NoCurrentQuestion)?;
        let options = build_options(&self.state.questions, current, &mut self.rng)?;
        self.state.options = Some(options.clone());
        Ok(options)
    }

    /// Derived view data for rendering. Runs the playing guard first.
    ///
    /// Returns `Ok(None)` when there is no question to show.
    ///
    /// # Errors
    ///
    /// Propagates `QuizError::InsufficientDistractors` from option building.
    pub fn current_view(&mut self) -> Result<Option<QuestionView>, QuizError> {
        self.apply_guard();
        if self.state.phase != Phase::Playing {
            return Ok(None);
        }

        let options = self.options()?;
        Ok(Some(QuestionView {
            number: self.state.q_idx + 1,
            options,
            hint: self.hint(),
        }))
    }

    /// Score the chosen raga and move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside the playing phase.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerOutcome, QuizError> {
        self.require_phase(Phase::Playing, "submit an answer")?;
        let current = self
            .state
            .current_question()
            .ok_or(QuizError::NoCurrentQuestion)?;

        let correct = current.is_answer(choice);
        let correct_raga = current.raga().to_owned();
        if correct {
            self.state.score = self.state.score.saturating_add(POINTS_PER_CORRECT);
        } else {
            self.state.lives = self.state.lives.saturating_sub(1);
        }
        debug!(
            q_idx = self.state.q_idx,
            correct,
            score = self.state.score,
            lives = self.state.lives,
            "answer submitted"
        );

        self.advance();
        Ok(AnswerOutcome {
            correct,
            chosen: choice.trim().to_owned(),
            correct_raga,
            score: self.state.score,
            lives: self.state.lives,
            game_over: self.state.phase == Phase::GameOver,
        })
    }

    /// Move past the current question without scoring it.
    ///
    /// Used when options cannot be built for it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside the playing phase.
    pub fn skip_current(&mut self) -> Result<(), QuizError> {
        self.require_phase(Phase::Playing, "skip a question")?;
        let raga = self
            .state
            .current_question()
            .map(|q| q.raga().to_owned())
            .unwrap_or_default();
        warn!(q_idx = self.state.q_idx, raga = %raga, "skipping question");
        self.advance();
        Ok(())
    }

    /// Discard the finished session and return to login defaults.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` unless the game is over.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.require_phase(Phase::GameOver, "restart")?;
        self.state = SessionState::default();
        Ok(())
    }

    pub(crate) fn require_phase(&self, expected: Phase, action: &'static str) -> Result<(), QuizError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(QuizError::WrongPhase {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn advance(&mut self) {
        self.state.q_idx = (self.state.q_idx + 1).min(self.state.questions.len());
        self.state.clear_question_memo();
        self.apply_guard();
    }

    fn apply_guard(&mut self) {
        if self.state.phase == Phase::Playing && self.state.is_exhausted() {
            self.state.phase = Phase::GameOver;
            self.state.clear_question_memo();
            info!(
                group = %self.state.group,
                score = self.state.score,
                lives = self.state.lives,
                answered = self.state.q_idx,
                "quiz session over"
            );
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.state.phase)
            .field("group", &self.state.group)
            .field("score", &self.state.score)
            .field("lives", &self.state.lives)
            .field("q_idx", &self.state.q_idx)
            .field("questions_len", &self.state.questions.len())
            .field("hint_active", &self.state.hint_active)
            .finish_non_exhaustive()
    }
}

/// Trimmed group name, or `None` when blank.
#[must_use]
pub fn normalize_group(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(raga: &str) -> QuestionRecord {
        QuestionRecord::new(raga, format!("{raga} notation"), "first clue;second clue").unwrap()
    }

    fn five_ragas() -> Vec<QuestionRecord> {
        ["Yaman", "Bhairav", "Kafi", "Durga", "Bhupali"]
            .into_iter()
            .map(question)
            .collect()
    }

    fn playing(seed: u64) -> QuizSession {
        let mut session = QuizSession::with_seed(seed);
        assert!(session.begin("Alpha", five_ragas()).unwrap());
        session
    }

    #[test]
    fn blank_group_keeps_login() {
        let mut session = QuizSession::with_seed(1);
        assert!(!session.begin("   ", five_ragas()).unwrap());
        assert_eq!(session.phase(), Phase::Login);
        assert!(session.state().questions().is_empty());
    }

    #[test]
    fn begin_shuffles_a_permutation_of_the_input() {
        let session = playing(2);
        let mut ragas: Vec<_> = session
            .state()
            .questions()
            .iter()
            .map(|q| q.raga().to_owned())
            .collect();
        ragas.sort();
        assert_eq!(ragas, vec!["Bhairav", "Bhupali", "Durga", "Kafi", "Yaman"]);
        assert_eq!(session.state().group(), "Alpha");
    }

    #[test]
    fn begin_with_no_questions_ends_immediately() {
        let mut session = QuizSession::with_seed(3);
        assert!(session.begin("Alpha", Vec::new()).unwrap());
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn hint_clue_is_fixed_until_question_advances() {
        let mut session = playing(4);
        let first = session.activate_hint().unwrap();
        for _ in 0..10 {
            assert_eq!(session.activate_hint().unwrap(), first);
            assert_eq!(session.hint(), Some(first.clone()));
        }
        let notation = format!("{} notation", session.current_question().unwrap().raga());
        assert_eq!(first.notation, notation);

        let answer = session.current_question().unwrap().raga().to_owned();
        session.submit_answer(&answer).unwrap();
        assert!(!session.state().hint_active());
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn options_are_memoized_per_question() {
        let mut session = playing(5);
        let first = session.options().unwrap();
        assert_eq!(session.options().unwrap(), first);
        let view = session.current_view().unwrap().unwrap();
        assert_eq!(view.options, first);
        assert_eq!(view.number, 1);
    }

    #[test]
    fn wrong_answer_costs_a_life_and_advances() {
        let mut session = playing(6);
        let outcome = session.submit_answer("Not a raga").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.lives, 2);
        assert_eq!(outcome.score, 0);
        assert_eq!(session.state().q_idx(), 1);
    }

    #[test]
    fn skip_advances_without_scoring() {
        let mut session = playing(7);
        session.skip_current().unwrap();
        assert_eq!(session.state().q_idx(), 1);
        assert_eq!(session.state().score(), 0);
        assert_eq!(session.state().lives(), STARTING_LIVES);
    }

    #[test]
    fn actions_in_wrong_phase_are_rejected() {
        let mut session = QuizSession::with_seed(8);
        assert!(matches!(
            session.submit_answer("Yaman"),
            Err(QuizError::WrongPhase { phase: Phase::Login, .. })
        ));
        assert!(matches!(
            session.activate_hint(),
            Err(QuizError::WrongPhase { .. })
        ));
        assert!(matches!(session.restart(), Err(QuizError::WrongPhase { .. })));
        assert_eq!(session.state(), &SessionState::default());
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = playing(9);
        while session.phase() == Phase::Playing {
            session.submit_answer("wrong").unwrap();
        }
        assert_eq!(session.state().lives(), 0);

        session.restart().unwrap();
        assert_eq!(session.state(), &SessionState::default());
    }
}
