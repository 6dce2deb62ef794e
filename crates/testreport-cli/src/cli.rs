//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;
use testreport_core::ExtractionConfig;
use testreport_core::GeneratorConfig;

#[derive(Parser)]
#[command(name = "testreport")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "The archive is extracted next to itself into 'extracted_data/', \
                  and the report is written to 'extracted_data/test_report'."
)]
pub struct Cli {
    /// Path to the .tar.xz archive holding the results document
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// File extension of the results document
    #[arg(long, value_name = "EXT", default_value = "json")]
    pub extension: String,

    /// Maximum number of archive entries to extract
    #[arg(long, default_value = "10000")]
    pub max_files: usize,

    /// Maximum total extracted size in bytes (suffixes K, M, G, T)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_total_size: Option<u64>,

    /// Maximum single file size in bytes (suffixes K, M, G, T)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Do not apply file permissions stored in the archive
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Extract symlinks whose targets stay inside the extraction directory
    #[arg(long)]
    pub allow_symlinks: bool,

    /// Extract hardlinks whose targets stay inside the extraction directory
    #[arg(long)]
    pub allow_hardlinks: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Builds the generator configuration from the command-line flags.
    pub fn generator_config(&self) -> GeneratorConfig {
        let defaults = ExtractionConfig::default();
        let extraction = ExtractionConfig {
            max_file_count: self.max_files,
            max_total_size: self.max_total_size.unwrap_or(defaults.max_total_size),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            allow_symlinks: self.allow_symlinks,
            allow_hardlinks: self.allow_hardlinks,
            preserve_permissions: !self.no_preserve_permissions,
            ..defaults
        };

        GeneratorConfig::default()
            .with_extraction(extraction)
            .with_record_extension(self.extension.as_str())
    }
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
