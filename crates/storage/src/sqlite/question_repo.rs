use async_trait::async_trait;
use quiz_core::model::QuestionRecord;
use sqlx::SqliteConnection;

use super::SqliteRepository;
use super::mapping::{map_sqlx_error, row_to_raw_question};
use crate::repository::{DataSourceError, QuestionSource, keep_valid_rows};

/// Insert shape for a question row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionRecord {
    pub raga: String,
    pub notation: String,
    pub clues: String,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_question(question: &QuestionRecord) -> Self {
        Self {
            raga: question.raga().to_owned(),
            notation: question.notation().to_owned(),
            clues: question.clues().to_owned(),
        }
    }
}

impl SqliteRepository {
    /// Insert a question and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if the insert fails.
    pub async fn insert_question(&self, question: NewQuestionRecord) -> Result<i64, DataSourceError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (raga, notation, clues)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(question.raga)
        .bind(question.notation)
        .bind(question.clues)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(res.last_insert_rowid())
    }

    /// Replace the whole question set in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if any statement fails; nothing is changed then.
    pub async fn replace_questions(
        &self,
        questions: &[QuestionRecord],
    ) -> Result<usize, DataSourceError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM questions")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if let Err(err) = insert_all(&mut tx, questions).await {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(err);
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(questions.len())
    }

    /// Append questions after the existing ones in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if any insert fails; nothing is added then.
    pub async fn append_questions(
        &self,
        questions: &[QuestionRecord],
    ) -> Result<usize, DataSourceError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;
        if let Err(err) = insert_all(&mut tx, questions).await {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(err);
        }
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(questions.len())
    }

    /// Number of stored rows, valid or not.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if the query fails.
    pub async fn count_questions(&self) -> Result<u64, DataSourceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        u64::try_from(count).map_err(|_| DataSourceError::Serialization("negative count".into()))
    }
}

async fn insert_all(
    conn: &mut SqliteConnection,
    questions: &[QuestionRecord],
) -> Result<(), DataSourceError> {
    for question in questions {
        sqlx::query("INSERT INTO questions (raga, notation, clues) VALUES (?1, ?2, ?3)")
            .bind(question.raga())
            .bind(question.notation())
            .bind(question.clues())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
    }
    Ok(())
}

#[async_trait]
impl QuestionSource for SqliteRepository {
    async fn fetch(&self) -> Result<Vec<QuestionRecord>, DataSourceError> {
        let rows = sqlx::query("SELECT id, raga, notation, clues FROM questions ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let raw = rows
            .iter()
            .map(row_to_raw_question)
            .collect::<Result<Vec<_>, _>>()?;

        keep_valid_rows(&self.database_url, raw)
    }

    fn describe(&self) -> String {
        self.database_url.clone()
    }
}
