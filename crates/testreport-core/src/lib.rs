//! Test report generation from archived test results.
//!
//! `testreport-core` extracts a tar.xz archive with built-in protection
//! against path traversal, finds the JSON results document inside it,
//! aggregates pass/fail/skip counts and durations, and renders a plain-text
//! report.
//!
//! # Examples
//!
//! ```no_run
//! use testreport_core::GeneratorConfig;
//! use testreport_core::generate_report;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = generate_report("results.tar.xz", &GeneratorConfig::default())?;
//! println!("Report written to {}", report.report_path.display());
//! print!("{}", report.text);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod format;
pub mod locate;
pub mod report;
pub mod results;
pub mod security;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main API types
pub use api::GeneratedReport;
pub use api::generate_report;
pub use api::generate_report_with_progress;
pub use config::ExtractionConfig;
pub use config::GeneratorConfig;
pub use error::QuotaResource;
pub use error::ReportError;
pub use error::Result;
pub use extraction::extract_archive;
pub use extraction::extract_archive_with_progress;
pub use format::format_report;
pub use locate::locate_record_file;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use results::ResultSummary;
pub use results::ResultsDocument;
pub use results::StatusDiagnostic;
pub use results::aggregate;
pub use results::parse_document;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::EntryType;
pub use types::SafePath;
pub use types::SafeSymlink;
