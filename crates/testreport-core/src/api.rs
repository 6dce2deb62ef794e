//! High-level public API for report generation.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionReport;
use crate::GeneratorConfig;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::ReportError;
use crate::Result;
use crate::extraction::extract_archive_with_progress;
use crate::format::format_report;
use crate::locate::locate_record_file;
use crate::results::ResultSummary;
use crate::results::aggregate;
use crate::results::parse_document;

/// Outcome of a successful report generation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// Aggregated counters.
    pub summary: ResultSummary,

    /// Rendered report text, as written to `report_path`.
    pub text: String,

    /// Where the report was written.
    pub report_path: PathBuf,

    /// The results document that was aggregated.
    pub record_path: PathBuf,

    /// Statistics of the extraction step.
    pub extraction: ExtractionReport,
}

/// Extracts `archive_path`, aggregates its results document, and writes the
/// text report next to the extracted files.
///
/// The archive is extracted into `<archive dir>/<extract_dir_name>` and the
/// report is written to `<extract dir>/<report_file_name>`, overwriting any
/// previous report. No report file is written if any step fails.
///
/// # Errors
///
/// Returns the first error of extraction, record lookup, parsing,
/// aggregation, formatting, or writing the report.
///
/// # Examples
///
/// ```no_run
/// use testreport_core::GeneratorConfig;
/// use testreport_core::generate_report;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = generate_report("results.tar.xz", &GeneratorConfig::default())?;
/// print!("{}", report.text);
/// # Ok(())
/// # }
/// ```
pub fn generate_report<P: AsRef<Path>>(
    archive_path: P,
    config: &GeneratorConfig,
) -> Result<GeneratedReport> {
    let mut noop = NoopProgress;
    generate_report_with_progress(archive_path, config, &mut noop)
}

/// Same as [`generate_report`], reporting extraction progress.
///
/// # Errors
///
/// Same as [`generate_report`].
pub fn generate_report_with_progress<P: AsRef<Path>>(
    archive_path: P,
    config: &GeneratorConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<GeneratedReport> {
    let archive_path = std::path::absolute(archive_path.as_ref())?;
    let extract_dir = extraction_dir(&archive_path, config)?;

    tracing::info!(
        archive = %archive_path.display(),
        dest = %extract_dir.display(),
        "generating test report"
    );

    let extraction =
        extract_archive_with_progress(&archive_path, &extract_dir, &config.extraction, progress)?;

    let record_path = locate_record_file(&extract_dir, &config.record_extension)?;
    let document = parse_document(&record_path)?;
    let summary = aggregate(&document)?;
    let text = format_report(&summary)?;

    let report_path = extract_dir.join(&config.report_file_name);
    std::fs::write(&report_path, &text)?;
    tracing::info!(path = %report_path.display(), "wrote test report");

    Ok(GeneratedReport {
        summary,
        text,
        report_path,
        record_path,
        extraction,
    })
}

fn extraction_dir(archive_path: &Path, config: &GeneratorConfig) -> Result<PathBuf> {
    let parent = archive_path.parent().ok_or_else(|| {
        ReportError::ArchiveRead(format!(
            "{} has no parent directory",
            archive_path.display()
        ))
    })?;
    Ok(parent.join(&config.extract_dir_name))
}
