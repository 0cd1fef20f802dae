use quiz_core::model::Phase;

/// Read-only copy of the observable session state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: Phase,
    pub group: String,
    pub score: u32,
    pub lives: u32,
    pub max_lives: u32,
    /// 1-based number of the question on screen; `total_questions + 1` once all are answered.
    pub question_number: usize,
    pub total_questions: usize,
    pub hint_active: bool,
}

/// Notation and (optionally) one clue revealed by the hint action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintView {
    pub notation: String,
    pub clue: Option<String>,
}

/// Everything needed to render the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number: usize,
    pub options: Vec<String>,
    pub hint: Option<HintView>,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub chosen: String,
    pub correct_raga: String,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
}
