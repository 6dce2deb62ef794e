//! Streaming extraction of xz-compressed tar archives.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use xz2::read::XzDecoder;

use super::common;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::ReportError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::security::EntryValidator;
use crate::security::ValidatedEntryType;
use crate::types::DestDir;
use crate::types::EntryType;

/// Opens `archive_path` as a tar stream behind an xz decoder.
///
/// # Errors
///
/// Returns `ReportError::ArchiveRead` if the file cannot be opened.
pub fn open_tar_xz(archive_path: &Path) -> Result<tar::Archive<XzDecoder<BufReader<File>>>> {
    let file = File::open(archive_path).map_err(|e| {
        ReportError::ArchiveRead(format!("failed to open {}: {e}", archive_path.display()))
    })?;
    let reader = BufReader::new(file);
    let decoder = XzDecoder::new(reader);
    Ok(tar::Archive::new(decoder))
}

/// Extracts every entry of `archive` into `dest`.
///
/// Entries are validated one at a time as they are read. The first entry
/// that fails validation aborts the extraction; entries before it stay on
/// disk and no later entry is written.
///
/// # Errors
///
/// Returns the first validation, read, or write error.
pub fn extract_entries<R: Read>(
    mut archive: tar::Archive<R>,
    dest: &DestDir,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let mut report = ExtractionReport::new();
    let mut validator = EntryValidator::new(config, dest);
    let mut copy_buffer = CopyBuffer::new();

    let entries = archive
        .entries()
        .map_err(|e| ReportError::ArchiveRead(format!("failed to read tar entries: {e}")))?;

    for (index, entry_result) in entries.enumerate() {
        let mut entry = entry_result
            .map_err(|e| ReportError::ArchiveRead(format!("failed to read tar entry: {e}")))?;

        let path = entry
            .path()
            .map_err(|e| ReportError::ArchiveRead(format!("invalid entry path: {e}")))?
            .into_owned();
        progress.on_entry_start(&path, index + 1);

        let kind = entry.header().entry_type();
        let link_name = entry
            .link_name()
            .map_err(|e| ReportError::ArchiveRead(format!("invalid link target: {e}")))?
            .map(std::borrow::Cow::into_owned);

        let Some(entry_type) = EntryType::from_tar(kind, link_name) else {
            let message = format!("skipped {}: unsupported entry kind {kind:?}", path.display());
            tracing::warn!(path = %path.display(), ?kind, "skipping unsupported entry");
            report.entries_skipped += 1;
            report.add_warning(message);
            progress.on_entry_complete(&path);
            continue;
        };

        let size = entry.size();
        let mode = entry.header().mode().ok();
        let validated = validator.validate_entry(&path, &entry_type, size, mode)?;

        match &validated.entry_type {
            ValidatedEntryType::File => {
                let written =
                    common::extract_file(&mut entry, &validated, dest, &mut report, &mut copy_buffer)?;
                tracing::debug!(path = %path.display(), bytes = written, "extracted file");
                progress.on_bytes_written(written);
            }
            ValidatedEntryType::Directory => {
                common::create_directory(&validated, dest, &mut report)?;
            }
            ValidatedEntryType::Symlink(symlink) => {
                common::create_symlink(symlink, dest, &mut report)?;
            }
            ValidatedEntryType::Hardlink { target } => {
                common::create_hardlink(&validated, target, dest, &mut report)?;
            }
            ValidatedEntryType::Skipped { reason } => {
                tracing::warn!(path = %path.display(), %reason, "skipping entry");
                report.entries_skipped += 1;
                report.add_warning(format!("skipped {}: {reason}", path.display()));
            }
        }

        progress.on_entry_complete(&path);
    }

    report.duration = start.elapsed();
    tracing::debug!(
        entries = validator.quota().entries(),
        bytes = validator.quota().bytes(),
        "quota usage"
    );
    progress.on_complete();

    Ok(report)
}
