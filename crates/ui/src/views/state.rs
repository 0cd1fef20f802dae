use services::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    SourceUnavailable,
    Unknown,
}

impl ViewError {
    /// Keep error mapping at the UI boundary.
    #[must_use]
    pub fn from_quiz(err: &QuizError) -> Self {
        match err {
            QuizError::DataSource(_) => Self::SourceUnavailable,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SourceUnavailable => {
                "Could not load the questions. Check the connection and try again."
            }
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::DataSourceError;

    #[test]
    fn data_source_errors_map_to_source_unavailable() {
        let err = QuizError::DataSource(DataSourceError::NoQuestions);
        assert_eq!(ViewError::from_quiz(&err), ViewError::SourceUnavailable);
        assert_eq!(
            ViewError::from_quiz(&QuizError::NoCurrentQuestion),
            ViewError::Unknown
        );
    }
}
