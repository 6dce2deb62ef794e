//! Text rendering of a result summary.

use crate::Result;
use crate::results::ResultSummary;

const SEPARATOR_WIDTH: usize = 40;

/// Renders the fixed multi-line report for `summary`.
///
/// Percentages and the duration are rounded to whole numbers.
///
/// # Errors
///
/// `ReportError::DivisionByZero` when `summary.total_count` is 0.
///
/// # Examples
///
/// ```
/// use testreport_core::ResultSummary;
/// use testreport_core::format_report;
///
/// let summary = ResultSummary {
///     environment_description: "22.04".to_string(),
///     total_count: 2,
///     pass_count: 2,
///     duration_sum: 4.2,
///     ..Default::default()
/// };
/// let text = format_report(&summary).unwrap();
/// assert!(text.contains("\t- pass: 2 (100%)"));
/// ```
pub fn format_report(summary: &ResultSummary) -> Result<String> {
    let skip = summary.percentage(summary.skip_count)?;
    let fail = summary.percentage(summary.fail_count)?;
    let pass = summary.percentage(summary.pass_count)?;
    let separator = "-".repeat(SEPARATOR_WIDTH);

    Ok(format!(
        "\n{separator}\n\
         Version tested: {}\n\
         Number of tests run: {}\n\
         Outcome:\n\
         \t- skip: {} ({skip:.0}%)\n\
         \t- fail: {} ({fail:.0}%)\n\
         \t- pass: {} ({pass:.0}%)\n\
         Total run duration: {:.0} seconds\n\
         {separator}\n",
        summary.environment_description,
        summary.total_count,
        summary.skip_count,
        summary.fail_count,
        summary.pass_count,
        summary.duration_sum,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ReportError;

    #[test]
    fn test_exact_layout() {
        let summary = ResultSummary {
            environment_description: "22.04".to_string(),
            total_count: 3,
            pass_count: 1,
            fail_count: 1,
            skip_count: 1,
            duration_sum: 1.5,
            diagnostics: Vec::new(),
        };

        let dashes = "-".repeat(40);
        let expected = format!(
            "\n{dashes}\nVersion tested: 22.04\nNumber of tests run: 3\nOutcome:\n\
             \t- skip: 1 (33%)\n\t- fail: 1 (33%)\n\t- pass: 1 (33%)\n\
             Total run duration: 2 seconds\n{dashes}\n"
        );
        assert_eq!(format_report(&summary).unwrap(), expected);
    }

    #[test]
    fn test_percentages_round() {
        let summary = ResultSummary {
            environment_description: "x".to_string(),
            total_count: 3,
            pass_count: 2,
            fail_count: 1,
            ..Default::default()
        };
        let text = format_report(&summary).unwrap();
        assert!(text.contains("\t- pass: 2 (67%)"));
        assert!(text.contains("\t- fail: 1 (33%)"));
        assert!(text.contains("\t- skip: 0 (0%)"));
    }

    #[test]
    fn test_zero_total_is_division_by_zero() {
        let summary = ResultSummary {
            environment_description: "22.04".to_string(),
            ..Default::default()
        };
        let err = format_report(&summary).unwrap_err();
        assert!(matches!(err, ReportError::DivisionByZero));
        assert!(err.to_string().contains("total_count might be 0"));
    }
}
