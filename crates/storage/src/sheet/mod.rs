//! Spreadsheet-backed question source.
//!
//! Reads a sheet published as CSV over HTTP. Google Sheets share links are
//! rewritten to their CSV export endpoint.

mod csv_rows;

use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::QuestionRecord;
use reqwest::Client;
use tracing::debug;

use crate::repository::{DataSourceError, QuestionSource};

pub use csv_rows::parse_question_csv;

/// Default per-request timeout for sheet downloads.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const GOOGLE_SHEETS_MARKER: &str = "docs.google.com/spreadsheets/d/";
const PUBLISHED_SEGMENT: &str = "e";

#[derive(Clone, Debug)]
pub struct SheetSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl SheetSource {
    /// Build a source for the given sheet URL.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::Connection` if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            url: csv_export_url(url),
            timeout,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_request_error(&self, err: &reqwest::Error) -> DataSourceError {
        if err.is_timeout() {
            DataSourceError::Timeout(self.timeout)
        } else {
            DataSourceError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl QuestionSource for SheetSource {
    async fn fetch(&self) -> Result<Vec<QuestionRecord>, DataSourceError> {
        debug!(url = %self.url, "downloading question sheet");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(&e))?;
        parse_question_csv(&self.url, body.as_bytes())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Rewrite a Google Sheets share/edit link into its CSV export URL.
///
/// Other URLs, and links that already point at an export, are returned unchanged.
#[must_use]
pub fn csv_export_url(raw: &str) -> String {
    let raw = raw.trim();
    let Some(start) = raw.find(GOOGLE_SHEETS_MARKER) else {
        return raw.to_owned();
    };
    if raw.contains("/export?") || raw.contains("output=csv") {
        return raw.to_owned();
    }

    let prefix = &raw[..start + GOOGLE_SHEETS_MARKER.len()];
    let rest = &raw[start + GOOGLE_SHEETS_MARKER.len()..];
    let mut segments = rest.split(['/', '?', '#']);
    let sheet_id = segments.next().unwrap_or_default();
    if sheet_id.is_empty() {
        return raw.to_owned();
    }

    let gid = rest
        .split(['?', '#', '&'])
        .find_map(|part| part.strip_prefix("gid="))
        .filter(|gid| !gid.is_empty());
    let gid_suffix = gid.map(|gid| format!("&gid={gid}")).unwrap_or_default();

    // "Publish to web" links live under `/d/e/<published id>/` and only
    // serve CSV through `pub?output=csv`.
    if sheet_id == PUBLISHED_SEGMENT {
        let published_id = segments.next().unwrap_or_default();
        if published_id.is_empty() {
            return raw.to_owned();
        }
        return format!("{prefix}{PUBLISHED_SEGMENT}/{published_id}/pub?output=csv{gid_suffix}");
    }

    format!("{prefix}{sheet_id}/export?format=csv{gid_suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_link_becomes_export_link() {
        let url = "https://docs.google.com/spreadsheets/d/abc123/edit#gid=42";
        assert_eq!(
            csv_export_url(url),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42"
        );
    }

    #[test]
    fn share_link_without_gid() {
        let url = "https://docs.google.com/spreadsheets/d/abc123/edit?usp=sharing";
        assert_eq!(
            csv_export_url(url),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
    }

    #[test]
    fn published_html_link_keeps_published_id() {
        let url = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQabc/pubhtml";
        assert_eq!(
            csv_export_url(url),
            "https://docs.google.com/spreadsheets/d/e/2PACX-1vQabc/pub?output=csv"
        );
    }

    #[test]
    fn published_link_carries_gid() {
        let url = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQabc/pub?gid=7&single=true";
        assert_eq!(
            csv_export_url(url),
            "https://docs.google.com/spreadsheets/d/e/2PACX-1vQabc/pub?output=csv&gid=7"
        );
    }

    #[test]
    fn published_csv_link_is_untouched() {
        let url = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQabc/pub?gid=0&single=true&output=csv";
        assert_eq!(csv_export_url(url), url);
    }

    #[test]
    fn export_and_foreign_links_are_untouched() {
        let export = "https://docs.google.com/spreadsheets/d/abc123/export?format=csv";
        assert_eq!(csv_export_url(export), export);

        let other = "https://example.org/ragas.csv";
        assert_eq!(csv_export_url(other), other);
    }

    #[test]
    fn source_keeps_rewritten_url() {
        let source = SheetSource::new(
            "https://docs.google.com/spreadsheets/d/xyz/edit",
            DEFAULT_FETCH_TIMEOUT,
        )
        .unwrap();
        assert_eq!(source.describe(), source.url());
        assert!(source.url().ends_with("/xyz/export?format=csv"));
    }
}
