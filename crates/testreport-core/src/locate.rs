//! Locating the results document among extracted files.

use std::path::Path;
use std::path::PathBuf;

use crate::ReportError;
use crate::Result;

/// Returns the first regular file in `directory` whose extension matches.
///
/// Only the immediate children are scanned, in directory-listing order.
/// The extension is given without the leading dot and must match exactly,
/// so `RESULTS.JSON` is not a match for `json`.
///
/// # Errors
///
/// - `ReportError::NotFound` if no file matches
/// - `ReportError::Io` if the directory cannot be read
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use testreport_core::locate_record_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let record = locate_record_file(Path::new("extracted_data"), "json")?;
/// println!("found {}", record.display());
/// # Ok(())
/// # }
/// ```
pub fn locate_record_file(directory: &Path, extension: &str) -> Result<PathBuf> {
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            tracing::debug!(path = %path.display(), "located record file");
            return Ok(path);
        }
    }

    Err(ReportError::NotFound {
        directory: directory.to_path_buf(),
        extension: extension.to_string(),
    })
}
