use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::ACQUIRE_TIMEOUT;
use crate::repository::{DataSourceError, RawQuestionRow};

fn ser<E: core::fmt::Display>(e: E) -> DataSourceError {
    DataSourceError::Serialization(e.to_string())
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> DataSourceError {
    match err {
        sqlx::Error::PoolTimedOut => DataSourceError::Timeout(ACQUIRE_TIMEOUT),
        err @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => ser(err),
        other => DataSourceError::Connection(other.to_string()),
    }
}

pub(crate) fn row_to_raw_question(row: &SqliteRow) -> Result<RawQuestionRow, DataSourceError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let line = usize::try_from(id).map_err(|_| ser("question id sign overflow"))?;
    Ok(RawQuestionRow {
        line,
        raga: row.try_get("raga").map_err(ser)?,
        notation: row.try_get("notation").map_err(ser)?,
        clues: row.try_get("clues").map_err(ser)?,
    })
}
