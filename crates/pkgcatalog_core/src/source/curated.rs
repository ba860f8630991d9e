//! Remote curated application-list source adapter.
//!
//! # Responsibility
//! - Fetch and parse the curated `{name, summary}` document over HTTP.
//! - Surface every failure as a `SourceError` so the import pass can log
//!   and continue (the curated source is never fatal).

use crate::source::{SourceError, SourceResult};
use log::info;
use serde::Deserialize;

const SOURCE_NAME: &str = "curated_apps";

/// One curated application record. Arrives with its summary pre-populated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CuratedRecord {
    pub name: String,
    pub summary: String,
}

/// Source of curated application records.
pub trait CuratedSource {
    fn fetch(&self) -> SourceResult<Vec<CuratedRecord>>;
}

/// Curated source fetching a YAML document from a configured URL.
pub struct HttpCuratedSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpCuratedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

}

impl CuratedSource for HttpCuratedSource {
    fn fetch(&self) -> SourceResult<Vec<CuratedRecord>> {
        info!(
            "event=curated_fetch module=source status=start url={}",
            self.url
        );
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|err| SourceError::unavailable(SOURCE_NAME, err.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))?;
        let body = response
            .text()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))?;

        parse_curated_document(&body)
    }
}

/// Parses a curated document into records.
pub fn parse_curated_document(text: &str) -> SourceResult<Vec<CuratedRecord>> {
    serde_yaml::from_str(text).map_err(|err| SourceError::parse(SOURCE_NAME, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_curated_document;
    use crate::source::SourceError;

    #[test]
    fn parses_curated_records() {
        let doc = "\
- name: shotwell
  summary: Photo organizer for GNOME
- name: gimp
  summary: Image editor
";
        let records = parse_curated_document(doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "shotwell");
        assert_eq!(records[1].summary, "Image editor");
    }

    #[test]
    fn empty_document_list_is_valid() {
        let records = parse_curated_document("[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_curated_document("not: a: list").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}
