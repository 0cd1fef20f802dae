use std::collections::BTreeSet;

use quiz_core::model::QuestionRecord;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::error::QuizError;

/// Number of wrong answers shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// Build the answer choices for `current`.
///
/// Distractors are drawn without replacement from the distinct ragas of the
/// whole question list, then the correct raga is mixed in.
///
/// # Errors
///
/// Returns `QuizError::InsufficientDistractors` when fewer than
/// `DISTRACTOR_COUNT` other ragas exist.
pub fn build_options<R: Rng + ?Sized>(
    questions: &[QuestionRecord],
    current: &QuestionRecord,
    rng: &mut R,
) -> Result<Vec<String>, QuizError> {
    let wrong: Vec<&str> = questions
        .iter()
        .map(QuestionRecord::raga)
        .filter(|raga| *raga != current.raga())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if wrong.len() < DISTRACTOR_COUNT {
        return Err(QuizError::InsufficientDistractors {
            raga: current.raga().to_owned(),
            available: wrong.len(),
        });
    }

    let mut options: Vec<String> = wrong
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|raga| (*raga).to_owned())
        .collect();
    options.push(current.raga().to_owned());
    options.shuffle(rng);
    Ok(options)
}
