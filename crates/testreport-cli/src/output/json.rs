//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use testreport_core::GeneratedReport;
use testreport_core::ResultSummary;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    links_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    report_path: String,
    record_path: String,
    summary: &'a ResultSummary,
    skip_percentage: f64,
    fail_percentage: f64,
    pass_percentage: f64,
    report: &'a str,
    extraction: ExtractionOutput,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn report_output(report: &GeneratedReport) -> Result<ReportOutput<'_>> {
        let summary = &report.summary;
        let extraction = &report.extraction;

        Ok(ReportOutput {
            report_path: report.report_path.display().to_string(),
            record_path: report.record_path.display().to_string(),
            summary,
            skip_percentage: summary.percentage(summary.skip_count)?,
            fail_percentage: summary.percentage(summary.fail_count)?,
            pass_percentage: summary.percentage(summary.pass_count)?,
            report: &report.text,
            extraction: ExtractionOutput {
                files_extracted: extraction.files_extracted,
                directories_created: extraction.directories_created,
                links_created: extraction.links_created,
                entries_skipped: extraction.entries_skipped,
                bytes_written: extraction.bytes_written,
                duration_ms: extraction.duration.as_millis(),
                warnings: extraction.warnings.clone(),
            },
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report_result(&self, report: &GeneratedReport) -> Result<()> {
        let output = JsonOutput::success("report", Self::report_output(report)?);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("report", format!("{error:?}"));
        let _ = Self::output(&output);
    }
}
