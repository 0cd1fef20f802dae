use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use quiz_core::model::QuestionRecord;
use serde::Deserialize;

use crate::repository::{DataSourceError, REQUIRED_COLUMNS, RawQuestionRow, keep_valid_rows};

fn ser<E: core::fmt::Display>(e: E) -> DataSourceError {
    DataSourceError::Serialization(e.to_string())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    raga: Option<String>,
    notation: Option<String>,
    clues: Option<String>,
}

/// Parse a CSV export with `raga`, `notation` and `clues` columns.
///
/// Header names are matched case-insensitively and extra columns are ignored.
/// Rows with missing values are dropped; see [`keep_valid_rows`].
///
/// # Errors
///
/// Returns `DataSourceError::MissingColumn` if a required header is absent,
/// `DataSourceError::Serialization` if the CSV itself cannot be read, and
/// `DataSourceError::NoQuestions` if no row is usable.
pub fn parse_question_csv<R: Read>(origin: &str, input: R) -> Result<Vec<QuestionRecord>, DataSourceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: StringRecord = reader
        .headers()
        .map_err(ser)?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DataSourceError::MissingColumn(column));
        }
    }
    reader.set_headers(headers);

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(ser)?;
        rows.push(RawQuestionRow {
            // header is line 1
            line: index + 2,
            raga: row.raga,
            notation: row.notation,
            clues: row.clues,
        });
    }

    keep_valid_rows(origin, rows)
}
