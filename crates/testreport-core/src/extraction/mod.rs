//! Secure extraction of the results archive.

pub mod common;
pub mod tar;

use std::path::Path;

use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::types::DestDir;

/// Extracts a tar.xz archive into `output_dir`, creating it if needed.
///
/// # Errors
///
/// - `ReportError::ArchiveRead` if the archive is missing or malformed
/// - `ReportError::UnsafeArchiveEntry` if an entry escapes `output_dir`
/// - `ReportError::QuotaExceeded` if a resource limit is hit
/// - `ReportError::Io` on filesystem failures
///
/// # Examples
///
/// ```no_run
/// use testreport_core::ExtractionConfig;
/// use testreport_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::default();
/// let report = extract_archive("results.tar.xz", "extracted_data", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    let mut noop = NoopProgress;
    extract_archive_with_progress(archive_path, output_dir, config, &mut noop)
}

/// Extracts a tar.xz archive with progress callbacks.
///
/// # Errors
///
/// Same as [`extract_archive`].
pub fn extract_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let dest = DestDir::create(output_dir.as_ref())?;

    tracing::debug!(
        archive = %archive_path.display(),
        dest = %dest.as_path().display(),
        "extracting archive"
    );

    let archive = tar::open_tar_xz(archive_path)?;
    let report = tar::extract_entries(archive, &dest, config, progress)?;

    tracing::debug!(
        files = report.files_extracted,
        bytes = report.bytes_written,
        skipped = report.entries_skipped,
        "extraction finished"
    );

    Ok(report)
}
