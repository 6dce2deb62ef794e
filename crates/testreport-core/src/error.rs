//! Error types for extraction, aggregation, and report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Represents a specific extraction limit that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// Entry count quota exceeded.
    FileCount {
        /// Current entry count.
        current: usize,
        /// Maximum allowed entry count.
        max: usize,
    },
    /// Total size quota exceeded.
    TotalSize {
        /// Current total size in bytes.
        current: u64,
        /// Maximum allowed total size in bytes.
        max: u64,
    },
    /// Single file size quota exceeded.
    FileSize {
        /// File size in bytes.
        size: u64,
        /// Maximum allowed file size in bytes.
        max: u64,
    },
    /// Path depth quota exceeded.
    PathDepth {
        /// Depth of the offending entry.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// Integer overflow detected in quota tracking.
    IntegerOverflow,
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCount { current, max } => {
                write!(f, "quota exceeded: entry count ({current} > {max})")
            }
            Self::TotalSize { current, max } => {
                write!(f, "quota exceeded: total size ({current} > {max})")
            }
            Self::FileSize { size, max } => {
                write!(f, "quota exceeded: single file size ({size} > {max})")
            }
            Self::PathDepth { depth, max } => {
                write!(f, "quota exceeded: path depth ({depth} > {max})")
            }
            Self::IntegerOverflow => {
                write!(f, "quota exceeded: integer overflow in quota tracking")
            }
        }
    }
}

/// Errors that can occur while generating a test report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is missing, unreadable, or not a valid xz-compressed tar stream.
    #[error("cannot read archive: {0}")]
    ArchiveRead(String),

    /// An archive entry would be written outside the extraction directory.
    #[error("unsafe archive entry {path}: {reason}")]
    UnsafeArchiveEntry {
        /// The entry path as stored in the archive.
        path: PathBuf,
        /// Why the entry was rejected.
        reason: String,
    },

    /// Extraction quota exceeded.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// No structured-data file was found after extraction.
    #[error("cannot find a .{extension} file in {}", directory.display())]
    NotFound {
        /// Directory that was scanned.
        directory: PathBuf,
        /// Extension that was searched for.
        extension: String,
    },

    /// The results document is not valid JSON.
    #[error("invalid results document: {0}")]
    InvalidDocument(String),

    /// A required field is absent or has the wrong type.
    #[error("results document schema error: {field}")]
    Schema {
        /// The missing or malformed field.
        field: String,
    },

    /// Percentages were requested for a summary with no tests.
    #[error(
        "total_count might be 0; please check the number of \"results\" entries in the JSON file"
    )]
    DivisionByZero,
}

impl ReportError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use testreport_core::ReportError;
    ///
    /// let err = ReportError::UnsafeArchiveEntry {
    ///     path: PathBuf::from("../etc/passwd"),
    ///     reason: "escapes extraction directory".into(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// assert!(!ReportError::DivisionByZero.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::UnsafeArchiveEntry { .. } | Self::QuotaExceeded { .. }
        )
    }

    pub(crate) fn unsafe_entry(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsafeArchiveEntry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(field: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => Self::Io(err.into()),
            Category::Data => Self::schema(err.to_string()),
            Category::Syntax | Category::Eof => Self::InvalidDocument(err.to_string()),
        }
    }
}
