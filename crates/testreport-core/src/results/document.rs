//! Serde model of the results document.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::Result;

/// Parsed results document.
///
/// Both top-level fields are optional at parse time; their absence is
/// reported by aggregation so that the error names the missing field.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultsDocument {
    /// Description of the environment the tests ran in.
    pub distribution: Option<Distribution>,

    /// Test records in document order.
    pub results: Option<Vec<TestRecord>>,
}

/// The `distribution` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Distribution {
    /// Version string shown as "Version tested".
    pub description: Option<String>,
}

/// One test outcome.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestRecord {
    /// Test identifier.
    pub id: String,

    /// Outcome of the test.
    pub status: TestStatus,

    /// Run time in seconds.
    pub duration: f64,
}

/// Test outcome. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TestStatus {
    /// `"pass"`
    Pass,
    /// `"fail"`
    Fail,
    /// `"skip"`
    Skip,
    /// Any other value, kept verbatim.
    Other(String),
}

impl TestStatus {
    /// Returns the status as written in the document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for TestStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            "skip" => Self::Skip,
            _ => Self::Other(raw),
        }
    }
}

impl ResultsDocument {
    /// Parses a document from bytes.
    ///
    /// # Errors
    ///
    /// - `ReportError::InvalidDocument` on malformed JSON
    /// - `ReportError::Schema` on missing or mistyped record fields
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parses a document from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`ResultsDocument::from_slice`], plus `ReportError::Io` when
    /// reading fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Opens and parses the results document at `path`.
///
/// # Errors
///
/// `ReportError::Io` if the file cannot be opened, otherwise the errors of
/// [`ResultsDocument::from_reader`].
pub fn parse_document(path: &Path) -> Result<ResultsDocument> {
    let file = File::open(path)?;
    let document = ResultsDocument::from_reader(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        records = document.results.as_ref().map_or(0, Vec::len),
        "parsed results document"
    );
    Ok(document)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ReportError;

    #[test]
    fn test_parse_full_document() {
        let doc = ResultsDocument::from_slice(
            br#"{
                "distribution": {"description": "22.04", "codename": "jammy"},
                "results": [
                    {"id": "t1", "status": "pass", "duration": 1.2},
                    {"id": "t2", "status": "error", "duration": 3}
                ],
                "session": "ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(
            doc.distribution.unwrap().description.as_deref(),
            Some("22.04")
        );
        let results = doc.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, TestStatus::Pass);
        assert_eq!(results[1].status, TestStatus::Other("error".to_string()));
        assert!((results[1].duration - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(
            TestStatus::from("PASS".to_string()),
            TestStatus::Other("PASS".to_string())
        );
        assert_eq!(TestStatus::from("skip".to_string()), TestStatus::Skip);
        assert_eq!(TestStatus::Other("error".into()).as_str(), "error");
    }

    #[test]
    fn test_missing_sections_parse() {
        let doc = ResultsDocument::from_slice(b"{}").unwrap();
        assert!(doc.distribution.is_none());
        assert!(doc.results.is_none());
    }

    #[test]
    fn test_malformed_json() {
        let result = ResultsDocument::from_slice(b"{\"results\": [");
        assert!(matches!(result, Err(ReportError::InvalidDocument(_))));
    }

    #[test]
    fn test_mistyped_duration_is_schema_error() {
        let result = ResultsDocument::from_slice(
            br#"{"results": [{"id": "t1", "status": "pass", "duration": "slow"}]}"#,
        );
        assert!(matches!(result, Err(ReportError::Schema { .. })));
    }

    #[test]
    fn test_missing_id_is_schema_error() {
        let result =
            ResultsDocument::from_slice(br#"{"results": [{"status": "pass", "duration": 1}]}"#);
        assert!(matches!(result, Err(ReportError::Schema { .. })));
    }

    #[test]
    fn test_parse_document_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = parse_document(&temp.path().join("results.json"));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
