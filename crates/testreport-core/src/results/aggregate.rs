//! Aggregation of test records into a summary.

use serde::Serialize;

use super::document::ResultsDocument;
use super::document::TestStatus;
use crate::ReportError;
use crate::Result;

/// Aggregated outcome counters of one results document.
///
/// `pass_count + fail_count + skip_count <= total_count`, with equality
/// unless `diagnostics` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSummary {
    /// Environment the tests ran in.
    pub environment_description: String,

    /// Number of records, including those with unrecognized statuses.
    pub total_count: usize,

    /// Records with status `pass`.
    pub pass_count: usize,

    /// Records with status `fail`.
    pub fail_count: usize,

    /// Records with status `skip`.
    pub skip_count: usize,

    /// Sum of all record durations in seconds.
    pub duration_sum: f64,

    /// One entry per record with an unrecognized status.
    pub diagnostics: Vec<StatusDiagnostic>,
}

/// A record whose status is not `pass`, `fail`, or `skip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDiagnostic {
    /// Record id.
    pub id: String,

    /// Status as written in the document.
    pub status: String,
}

impl ResultSummary {
    /// Returns `count` as a percentage of `total_count`.
    ///
    /// # Errors
    ///
    /// `ReportError::DivisionByZero` when `total_count` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use testreport_core::ResultSummary;
    ///
    /// let summary = ResultSummary {
    ///     total_count: 4,
    ///     pass_count: 1,
    ///     ..Default::default()
    /// };
    /// assert_eq!(summary.percentage(summary.pass_count).unwrap(), 25.0);
    /// assert!(ResultSummary::default().percentage(0).is_err());
    /// ```
    pub fn percentage(&self, count: usize) -> Result<f64> {
        if self.total_count == 0 {
            return Err(ReportError::DivisionByZero);
        }
        Ok(count as f64 * 100.0 / self.total_count as f64)
    }
}

/// Aggregates a parsed document in a single pass over its records.
///
/// Unrecognized statuses count toward `total_count` and `duration_sum`
/// only, and each one is recorded as a diagnostic and logged.
///
/// # Errors
///
/// `ReportError::Schema` if `distribution.description` or `results` is
/// absent.
pub fn aggregate(document: &ResultsDocument) -> Result<ResultSummary> {
    let environment_description = document
        .distribution
        .as_ref()
        .and_then(|d| d.description.clone())
        .ok_or_else(|| ReportError::schema("distribution.description"))?;

    let records = document
        .results
        .as_ref()
        .ok_or_else(|| ReportError::schema("results"))?;

    let mut summary = ResultSummary {
        environment_description,
        total_count: records.len(),
        ..Default::default()
    };

    for record in records {
        match &record.status {
            TestStatus::Pass => summary.pass_count += 1,
            TestStatus::Fail => summary.fail_count += 1,
            TestStatus::Skip => summary.skip_count += 1,
            TestStatus::Other(status) => {
                tracing::warn!(id = %record.id, %status, "unexpected test status");
                summary.diagnostics.push(StatusDiagnostic {
                    id: record.id.clone(),
                    status: status.clone(),
                });
            }
        }
        summary.duration_sum += record.duration;
    }

    tracing::debug!(
        total = summary.total_count,
        pass = summary.pass_count,
        fail = summary.fail_count,
        skip = summary.skip_count,
        "aggregated results"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::results::document::Distribution;
    use crate::results::document::TestRecord;

    fn record(id: &str, status: &str, duration: f64) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            status: TestStatus::from(status.to_string()),
            duration,
        }
    }

    fn document(records: Vec<TestRecord>) -> ResultsDocument {
        ResultsDocument {
            distribution: Some(Distribution {
                description: Some("22.04".to_string()),
            }),
            results: Some(records),
        }
    }

    #[test]
    fn test_aggregate_one_of_each() {
        let doc = document(vec![
            record("t1", "pass", 1.2),
            record("t2", "fail", 0.3),
            record("t3", "skip", 0.0),
        ]);

        let summary = aggregate(&doc).unwrap();
        assert_eq!(summary.environment_description, "22.04");
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.pass_count, 1);
        assert_eq!(summary.fail_count, 1);
        assert_eq!(summary.skip_count, 1);
        assert!((summary.duration_sum - 1.5).abs() < 1e-9);
        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_results() {
        let summary = aggregate(&document(Vec::new())).unwrap();
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.duration_sum, 0.0);
        assert!(matches!(
            summary.percentage(0),
            Err(ReportError::DivisionByZero)
        ));
    }

    #[test]
    fn test_unrecognized_status() {
        let doc = document(vec![record("t1", "pass", 1.0), record("t9", "error", 2.5)]);

        let summary = aggregate(&doc).unwrap();
        assert_eq!(summary.total_count, 2);
        assert_eq!(
            summary.pass_count + summary.fail_count + summary.skip_count,
            1
        );
        assert!((summary.duration_sum - 3.5).abs() < 1e-9);
        assert_eq!(
            summary.diagnostics,
            vec![StatusDiagnostic {
                id: "t9".to_string(),
                status: "error".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_description() {
        let doc = ResultsDocument {
            distribution: Some(Distribution { description: None }),
            results: Some(Vec::new()),
        };
        match aggregate(&doc) {
            Err(ReportError::Schema { field }) => assert_eq!(field, "distribution.description"),
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_results() {
        let doc = ResultsDocument {
            results: None,
            ..document(Vec::new())
        };
        match aggregate(&doc) {
            Err(ReportError::Schema { field }) => assert_eq!(field, "results"),
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn test_percentage() {
        let summary = ResultSummary {
            total_count: 3,
            ..Default::default()
        };
        assert!((summary.percentage(1).unwrap() - 33.333_333).abs() < 1e-3);
        assert_eq!(summary.percentage(3).unwrap(), 100.0);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = aggregate(&document(vec![record("t1", "pass", 1.0)])).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_count"], 1);
        assert_eq!(json["environment_description"], "22.04");
    }
}
