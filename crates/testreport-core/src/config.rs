//! Configuration for archive extraction and report generation.

/// Extraction limits and policy with default-deny settings for links.
///
/// # Examples
///
/// ```
/// use testreport_core::ExtractionConfig;
///
/// // Use secure defaults
/// let config = ExtractionConfig::default();
///
/// // Customize for specific needs
/// let custom = ExtractionConfig {
///     max_file_size: 100 * 1024 * 1024,   // 100 MB
///     max_total_size: 1024 * 1024 * 1024, // 1 GB
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Maximum size for a single file in bytes.
    pub max_file_size: u64,

    /// Maximum total size for all extracted files in bytes.
    pub max_total_size: u64,

    /// Maximum number of entries that can be extracted.
    pub max_file_count: usize,

    /// Maximum path depth allowed.
    pub max_path_depth: usize,

    /// Extract symlinks whose target stays inside the extraction directory.
    pub allow_symlinks: bool,

    /// Extract hardlinks whose target stays inside the extraction directory.
    pub allow_hardlinks: bool,

    /// Apply permission bits from the archive (setuid/setgid/sticky are
    /// always stripped).
    pub preserve_permissions: bool,
}

impl Default for ExtractionConfig {
    /// Creates an `ExtractionConfig` with secure default settings.
    ///
    /// Default values:
    /// - `max_file_size`: 50 MB
    /// - `max_total_size`: 500 MB
    /// - `max_file_count`: 10,000
    /// - `max_path_depth`: 32
    /// - `allow_symlinks`: false (deny)
    /// - `allow_hardlinks`: false (deny)
    /// - `preserve_permissions`: true
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,   // 50 MB
            max_total_size: 500 * 1024 * 1024, // 500 MB
            max_file_count: 10_000,
            max_path_depth: 32,
            allow_symlinks: false,
            allow_hardlinks: false,
            preserve_permissions: true,
        }
    }
}

/// Default extension of the results document.
pub const DEFAULT_RECORD_EXTENSION: &str = "json";

/// Default name of the extraction directory created next to the archive.
pub const DEFAULT_EXTRACT_DIR_NAME: &str = "extracted_data";

/// Default name of the report file written inside the extraction directory.
pub const DEFAULT_REPORT_FILE_NAME: &str = "test_report";

/// Settings for a full report generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Extraction limits.
    pub extraction: ExtractionConfig,

    /// Extension (without dot) identifying the results document.
    pub record_extension: String,

    /// Name of the directory created next to the archive.
    pub extract_dir_name: String,

    /// Name of the report file written inside the extraction directory.
    pub report_file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            record_extension: DEFAULT_RECORD_EXTENSION.to_string(),
            extract_dir_name: DEFAULT_EXTRACT_DIR_NAME.to_string(),
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the extraction limits.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets the results document extension. A leading dot is ignored.
    #[must_use]
    pub fn with_record_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.record_extension = extension.trim_start_matches('.').to_string();
        self
    }
}
