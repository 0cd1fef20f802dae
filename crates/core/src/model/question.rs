use thiserror::Error;

/// Separator between individual clues in a record's `clues` field.
pub const CLUE_SEPARATOR: char = ';';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("raga is missing")]
    MissingRaga,

    #[error("notation is missing")]
    MissingNotation,

    #[error("clues are missing")]
    MissingClues,
}

/// A single quiz question as delivered by a question source.
///
/// All three fields are required and non-blank; values are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionRecord {
    raga: String,
    notation: String,
    clues: String,
}

impl QuestionRecord {
    /// Build a validated record.
    ///
    /// # Errors
    ///
    /// Returns the `QuestionError` for the first field that is empty after trimming.
    pub fn new(
        raga: impl Into<String>,
        notation: impl Into<String>,
        clues: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let raga = required(raga.into(), QuestionError::MissingRaga)?;
        let notation = required(notation.into(), QuestionError::MissingNotation)?;
        let clues = required(clues.into(), QuestionError::MissingClues)?;

        Ok(Self {
            raga,
            notation,
            clues,
        })
    }

    /// Build a record from optional column values, treating `None` as missing.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when a field is absent or blank.
    pub fn from_columns(
        raga: Option<String>,
        notation: Option<String>,
        clues: Option<String>,
    ) -> Result<Self, QuestionError> {
        Self::new(
            raga.ok_or(QuestionError::MissingRaga)?,
            notation.ok_or(QuestionError::MissingNotation)?,
            clues.ok_or(QuestionError::MissingClues)?,
        )
    }

    #[must_use]
    pub fn raga(&self) -> &str {
        &self.raga
    }

    #[must_use]
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// The raw `;`-separated clue string.
    #[must_use]
    pub fn clues(&self) -> &str {
        &self.clues
    }

    /// Individual clues, trimmed, with empty entries dropped.
    #[must_use]
    pub fn clue_list(&self) -> Vec<&str> {
        self.clues
            .split(CLUE_SEPARATOR)
            .map(str::trim)
            .filter(|clue| !clue.is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_answer(&self, choice: &str) -> bool {
        self.raga == choice.trim()
    }
}

fn required(value: String, missing: QuestionError) -> Result<String, QuestionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_fields() {
        let record = QuestionRecord::new("  Yaman ", "N R G M# D N S'", "evening;Kalyan thaat").unwrap();
        assert_eq!(record.raga(), "Yaman");
        assert_eq!(record.notation(), "N R G M# D N S'");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            QuestionRecord::new(" ", "S R G", "x").unwrap_err(),
            QuestionError::MissingRaga
        );
        assert_eq!(
            QuestionRecord::new("Bhairav", "", "x").unwrap_err(),
            QuestionError::MissingNotation
        );
        assert_eq!(
            QuestionRecord::new("Bhairav", "S r G", " \t").unwrap_err(),
            QuestionError::MissingClues
        );
    }

    #[test]
    fn absent_columns_are_rejected() {
        let err = QuestionRecord::from_columns(Some("Bhairav".into()), None, Some("dawn".into()))
            .unwrap_err();
        assert_eq!(err, QuestionError::MissingNotation);
    }

    #[test]
    fn clue_list_splits_and_skips_empty_entries() {
        let record = QuestionRecord::new("Bhupali", "S R G P D S'", "Sa Re Ga;Ma Pa;; ").unwrap();
        assert_eq!(record.clue_list(), vec!["Sa Re Ga", "Ma Pa"]);
    }

    #[test]
    fn answer_match_ignores_surrounding_whitespace() {
        let record = QuestionRecord::new("Durga", "S R M P D S'", "pentatonic").unwrap();
        assert!(record.is_answer(" Durga"));
        assert!(!record.is_answer("durga"));
    }
}
