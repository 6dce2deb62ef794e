//! Error conversion utilities for CLI.
//!
//! Converts testreport-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use testreport_core::ReportError;

/// Converts `ReportError` to user-friendly anyhow error with context
pub fn convert_report_error(err: ReportError, archive: &Path) -> anyhow::Error {
    match err {
        ReportError::UnsafeArchiveEntry { path, reason } => {
            anyhow!(
                "Security violation: Archive '{}' contains unsafe entry '{}': {}\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display(),
                reason
            )
        }
        ReportError::QuotaExceeded { resource } => {
            anyhow!(
                "Extraction limit exceeded for '{}': {}\n\
                 HINT: Use --max-files, --max-total-size, or --max-file-size to increase limits.",
                archive.display(),
                resource
            )
        }
        ReportError::ArchiveRead(reason) => {
            anyhow!(
                "Cannot read archive '{}': {}\n\
                 HINT: The archive must exist and be a valid .tar.xz file.",
                archive.display(),
                reason
            )
        }
        ReportError::NotFound {
            directory,
            extension,
        } => {
            anyhow!(
                "No .{} file found in '{}'\n\
                 HINT: Use --extension to look for a different results file type.",
                extension,
                directory.display()
            )
        }
        ReportError::InvalidDocument(reason) => {
            anyhow!(
                "Results document in '{}' is not valid JSON: {}\n\
                 HINT: The results file may be truncated or corrupted.",
                archive.display(),
                reason
            )
        }
        ReportError::Schema { field } => {
            anyhow!(
                "Results document in '{}' is missing or has a malformed field: {}\n\
                 HINT: Expected 'distribution.description' and a 'results' list of \
                 {{id, status, duration}} records.",
                archive.display(),
                field
            )
        }
        ReportError::DivisionByZero => {
            anyhow!(
                "Cannot compute outcome percentages for '{}': {}\n\
                 HINT: The results document contains no test records.",
                archive.display(),
                ReportError::DivisionByZero
            )
        }
        ReportError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a core result about report generation
pub fn add_archive_context<T>(
    result: Result<T, ReportError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_report_error(e, archive))
}
