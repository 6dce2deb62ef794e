//! Writers for validated entries.
//!
//! Every function here takes a `ValidatedEntry` or validated link, so the
//! containment checks have already passed when a path is touched.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::security::validator::ValidatedEntry;
use crate::types::DestDir;
use crate::types::SafePath;
use crate::types::SafeSymlink;

/// Writes a regular file entry and returns the number of bytes written.
///
/// An existing non-directory at the output path is removed first so that a
/// symlink or hardlink left by an earlier entry is never written through.
/// The output file is flushed and closed before permissions are applied.
///
/// # Errors
///
/// Returns an error if directory creation, the copy, or permission setting
/// fails.
pub fn extract_file<R: Read>(
    reader: &mut R,
    validated: &ValidatedEntry,
    dest: &DestDir,
    report: &mut ExtractionReport,
    copy_buffer: &mut CopyBuffer,
) -> Result<u64> {
    let output_path = dest.join(&validated.safe_path);

    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }
    remove_existing(&output_path)?;

    let bytes_written = {
        let output_file = File::create(&output_path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, output_file);
        let bytes = copy_with_buffer(reader, &mut writer, copy_buffer)?;
        writer.flush()?;
        bytes
    };

    #[cfg(unix)]
    if let Some(mode) = validated.mode {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&output_path, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = validated.mode;

    report.files_extracted += 1;
    report.bytes_written = report.bytes_written.saturating_add(bytes_written);

    Ok(bytes_written)
}

/// Creates a directory entry. Idempotent.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn create_directory(
    validated: &ValidatedEntry,
    dest: &DestDir,
    report: &mut ExtractionReport,
) -> Result<()> {
    if validated.safe_path.is_root() {
        return Ok(());
    }

    create_dir_all(dest.join(&validated.safe_path))?;
    report.directories_created += 1;

    Ok(())
}

/// Creates a validated symbolic link.
///
/// # Errors
///
/// Returns an error if the platform has no symlink support or creation
/// fails.
pub fn create_symlink(
    symlink: &SafeSymlink,
    dest: &DestDir,
    report: &mut ExtractionReport,
) -> Result<()> {
    let link_path = dest.as_path().join(symlink.link_path());
    if let Some(parent) = link_path.parent() {
        create_dir_all(parent)?;
    }
    remove_existing(&link_path)?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(symlink.target_path(), &link_path)?;

    #[cfg(not(unix))]
    return Err(crate::ReportError::unsafe_entry(
        symlink.link_path(),
        "symlinks are not supported on this platform",
    ));

    #[cfg(unix)]
    {
        report.links_created += 1;
        Ok(())
    }
}

/// Creates a hard link to an already extracted file.
///
/// # Errors
///
/// Returns an error if link creation fails.
pub fn create_hardlink(
    validated: &ValidatedEntry,
    target: &SafePath,
    dest: &DestDir,
    report: &mut ExtractionReport,
) -> Result<()> {
    let link_path = dest.join(&validated.safe_path);
    if let Some(parent) = link_path.parent() {
        create_dir_all(parent)?;
    }
    remove_existing(&link_path)?;

    std::fs::hard_link(dest.join(target), &link_path)?;
    report.links_created += 1;

    Ok(())
}

fn remove_existing(path: &Path) -> std::io::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => std::fs::remove_file(path),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractionConfig;
    use crate::security::validator::ValidatedEntryType;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn validated(path: &str, dest: &DestDir, mode: Option<u32>) -> ValidatedEntry {
        ValidatedEntry {
            safe_path: SafePath::validate(Path::new(path), dest, &ExtractionConfig::default())
                .expect("path should be valid"),
            entry_type: ValidatedEntryType::File,
            mode,
        }
    }

    #[test]
    fn test_extract_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();

        let entry = validated("nested/dir/results.json", &dest, None);
        let written = extract_file(
            &mut Cursor::new(b"{}".to_vec()),
            &entry,
            &dest,
            &mut report,
            &mut buffer,
        )
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.bytes_written, 2);
        assert_eq!(
            std::fs::read(temp.path().join("nested/dir/results.json")).unwrap(),
            b"{}"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_file_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();

        let entry = validated("run.sh", &dest, Some(0o750));
        extract_file(
            &mut Cursor::new(b"#!/bin/sh".to_vec()),
            &entry,
            &dest,
            &mut report,
            &mut buffer,
        )
        .unwrap();

        let mode = std::fs::metadata(temp.path().join("run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_file_replaces_dangling_symlink() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let target = outside.path().join("victim");
        std::os::unix::fs::symlink(&target, temp.path().join("results.json")).unwrap();

        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();
        let entry = validated("results.json", &dest, None);
        extract_file(
            &mut Cursor::new(b"data".to_vec()),
            &entry,
            &dest,
            &mut report,
            &mut buffer,
        )
        .unwrap();

        assert!(!target.exists());
        let meta = std::fs::symlink_metadata(temp.path().join("results.json")).unwrap();
        assert!(meta.is_file());
    }

    #[test]
    fn test_create_directory_idempotent() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let mut report = ExtractionReport::new();

        let mut entry = validated("dir", &dest, None);
        entry.entry_type = ValidatedEntryType::Directory;

        create_directory(&entry, &dest, &mut report).unwrap();
        create_directory(&entry, &dest, &mut report).unwrap();
        assert!(temp.path().join("dir").is_dir());
        assert_eq!(report.directories_created, 2);
    }

    #[test]
    fn test_create_directory_root_is_noop() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let mut report = ExtractionReport::new();

        let mut entry = validated("./", &dest, None);
        entry.entry_type = ValidatedEntryType::Directory;

        create_directory(&entry, &dest, &mut report).unwrap();
        assert_eq!(report.directories_created, 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_create_symlink() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().to_path_buf()).unwrap();
        let mut report = ExtractionReport::new();
        std::fs::write(temp.path().join("results.json"), b"{}").unwrap();

        let link = SafePath::validate(Path::new("latest.json"), &dest, &ExtractionConfig::default())
            .unwrap();
        let symlink = SafeSymlink::validate(&link, Path::new("results.json"), &dest).unwrap();
        create_symlink(&symlink, &dest, &mut report).unwrap();

        assert_eq!(report.links_created, 1);
        assert_eq!(std::fs::read(temp.path().join("latest.json")).unwrap(), b"{}");
    }
}
