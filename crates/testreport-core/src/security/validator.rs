//! Entry validation orchestrator.
//!
//! `EntryValidator` runs every check an archive entry must pass before any
//! of its bytes reach the disk.

use std::path::Path;

use crate::ExtractionConfig;
use crate::ReportError;
use crate::Result;
use crate::security::permissions::sanitize_permissions;
use crate::security::quota::QuotaTracker;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::SafePath;
use crate::types::SafeSymlink;

/// Result of entry validation, ready for extraction.
#[derive(Debug)]
pub struct ValidatedEntry {
    /// Validated path within destination directory
    pub safe_path: SafePath,

    /// Validated entry type
    pub entry_type: ValidatedEntryType,

    /// Sanitized file permissions, if they should be applied
    pub mode: Option<u32>,
}

/// Validated entry type variants.
#[derive(Debug)]
pub enum ValidatedEntryType {
    /// Regular file
    File,

    /// Directory
    Directory,

    /// Symlink with a target inside the destination
    Symlink(SafeSymlink),

    /// Hardlink to an already extracted file
    Hardlink {
        /// Target path, relative to the destination
        target: SafePath,
    },

    /// Entry that passed the containment checks but is not written
    Skipped {
        /// Why the entry is not written
        reason: String,
    },
}

/// Validates archive entries against one destination and configuration.
///
/// Quota usage accumulates across calls, so one validator must be used per
/// extraction.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use std::path::PathBuf;
/// use testreport_core::ExtractionConfig;
/// use testreport_core::security::EntryValidator;
/// use testreport_core::types::DestDir;
/// use testreport_core::types::EntryType;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new(PathBuf::from("/tmp"))?;
/// let config = ExtractionConfig::default();
/// let mut validator = EntryValidator::new(&config, &dest);
///
/// let entry = validator.validate_entry(
///     Path::new("results.json"),
///     &EntryType::File,
///     1024,
///     Some(0o644),
/// )?;
/// # Ok(())
/// # }
/// ```
pub struct EntryValidator<'a> {
    config: &'a ExtractionConfig,
    dest: &'a DestDir,
    quota_tracker: QuotaTracker,
}

impl<'a> EntryValidator<'a> {
    /// Creates a new entry validator.
    #[must_use]
    pub fn new(config: &'a ExtractionConfig, dest: &'a DestDir) -> Self {
        Self {
            config,
            dest,
            quota_tracker: QuotaTracker::new(),
        }
    }

    /// Validates an archive entry.
    ///
    /// Containment is checked first, so an escaping entry is reported as
    /// `UnsafeArchiveEntry` even when a quota would also reject it.
    ///
    /// # Errors
    ///
    /// - `ReportError::UnsafeArchiveEntry` if the entry or its link target
    ///   escapes the destination, or a file would replace the destination
    ///   itself
    /// - `ReportError::QuotaExceeded` if a limit is exceeded
    pub fn validate_entry(
        &mut self,
        path: &Path,
        entry_type: &EntryType,
        size: u64,
        mode: Option<u32>,
    ) -> Result<ValidatedEntry> {
        let safe_path = SafePath::validate(path, self.dest, self.config)?;

        if safe_path.is_root() && !entry_type.is_directory() {
            return Err(ReportError::unsafe_entry(
                path,
                "entry would replace the extraction directory",
            ));
        }

        let (validated_type, mode) = match entry_type {
            EntryType::File => {
                self.quota_tracker.record_entry(size, self.config)?;
                let mode = mode
                    .filter(|_| self.config.preserve_permissions)
                    .map(sanitize_permissions);
                (ValidatedEntryType::File, mode)
            }

            EntryType::Directory => {
                self.quota_tracker.record_entry(0, self.config)?;
                (ValidatedEntryType::Directory, None)
            }

            EntryType::Symlink { target } => {
                let symlink = SafeSymlink::validate(&safe_path, target, self.dest)?;
                if self.config.allow_symlinks {
                    self.quota_tracker.record_entry(0, self.config)?;
                    (ValidatedEntryType::Symlink(symlink), None)
                } else {
                    (skipped("symlinks are not allowed"), None)
                }
            }

            EntryType::Hardlink { target } => {
                let target = self.validate_hardlink_target(path, target)?;
                if self.config.allow_hardlinks {
                    self.quota_tracker.record_entry(0, self.config)?;
                    (ValidatedEntryType::Hardlink { target }, None)
                } else {
                    (skipped("hardlinks are not allowed"), None)
                }
            }
        };

        Ok(ValidatedEntry {
            safe_path,
            entry_type: validated_type,
            mode,
        })
    }

    /// Returns the quota usage so far.
    #[must_use]
    pub fn quota(&self) -> &QuotaTracker {
        &self.quota_tracker
    }

    fn validate_hardlink_target(&self, link: &Path, target: &Path) -> Result<SafePath> {
        let target = SafePath::validate(target, self.dest, self.config).map_err(|err| match err {
            ReportError::UnsafeArchiveEntry { reason, .. } => {
                ReportError::unsafe_entry(link, format!("hardlink target {reason}"))
            }
            other => other,
        })?;

        let target_abs = self.dest.join(&target);
        let is_file = std::fs::symlink_metadata(&target_abs).is_ok_and(|meta| meta.is_file());
        if !is_file {
            return Err(ReportError::unsafe_entry(
                link,
                format!(
                    "hardlink target {} was not extracted before the link",
                    target.as_path().display()
                ),
            ));
        }

        Ok(target)
    }
}

fn skipped(reason: &str) -> ValidatedEntryType {
    ValidatedEntryType::Skipped {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_dest() -> (TempDir, DestDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path().to_path_buf()).expect("failed to create dest");
        (temp, dest)
    }

    #[test]
    fn test_validate_file_entry() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(Path::new("results.json"), &EntryType::File, 1024, Some(0o644))
            .unwrap();

        assert_eq!(entry.safe_path.as_path(), Path::new("results.json"));
        assert!(matches!(entry.entry_type, ValidatedEntryType::File));
        assert_eq!(entry.mode, Some(0o644));
        assert_eq!(validator.quota().bytes(), 1024);
    }

    #[test]
    fn test_file_mode_sanitized() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(Path::new("run.sh"), &EntryType::File, 10, Some(0o4755))
            .unwrap();
        assert_eq!(entry.mode, Some(0o755));
    }

    #[test]
    fn test_file_mode_dropped_without_preserve() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig {
            preserve_permissions: false,
            ..Default::default()
        };
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(Path::new("run.sh"), &EntryType::File, 10, Some(0o755))
            .unwrap();
        assert_eq!(entry.mode, None);
    }

    #[test]
    fn test_validate_directory_entry() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(Path::new("dir"), &EntryType::Directory, 0, Some(0o755))
            .unwrap();
        assert!(matches!(entry.entry_type, ValidatedEntryType::Directory));
        assert!(entry.mode.is_none());
    }

    #[test]
    fn test_root_directory_entry_accepted() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(Path::new("./"), &EntryType::Directory, 0, None)
            .unwrap();
        assert!(entry.safe_path.is_root());
    }

    #[test]
    fn test_root_file_entry_rejected() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let result = validator.validate_entry(Path::new("."), &EntryType::File, 0, None);
        assert!(matches!(
            result,
            Err(ReportError::UnsafeArchiveEntry { .. })
        ));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let result =
            validator.validate_entry(Path::new("../etc/passwd"), &EntryType::File, 10, None);
        assert!(matches!(
            result,
            Err(ReportError::UnsafeArchiveEntry { .. })
        ));
        assert_eq!(validator.quota().entries(), 0);
    }

    #[test]
    fn test_symlink_skipped_by_default() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(
                Path::new("link"),
                &EntryType::Symlink {
                    target: PathBuf::from("results.json"),
                },
                0,
                None,
            )
            .unwrap();
        assert!(matches!(
            entry.entry_type,
            ValidatedEntryType::Skipped { .. }
        ));
    }

    #[test]
    fn test_escaping_symlink_rejected_even_when_disallowed() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig::default();
        let mut validator = EntryValidator::new(&config, &dest);

        let result = validator.validate_entry(
            Path::new("link"),
            &EntryType::Symlink {
                target: PathBuf::from("../../etc/passwd"),
            },
            0,
            None,
        );
        assert!(matches!(
            result,
            Err(ReportError::UnsafeArchiveEntry { .. })
        ));
    }

    #[test]
    fn test_symlink_allowed() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig {
            allow_symlinks: true,
            ..Default::default()
        };
        let mut validator = EntryValidator::new(&config, &dest);

        let entry = validator
            .validate_entry(
                Path::new("link"),
                &EntryType::Symlink {
                    target: PathBuf::from("results.json"),
                },
                0,
                None,
            )
            .unwrap();
        assert!(matches!(entry.entry_type, ValidatedEntryType::Symlink(_)));
    }

    #[test]
    fn test_hardlink_requires_extracted_target() {
        let (temp, dest) = create_test_dest();
        let config = ExtractionConfig {
            allow_hardlinks: true,
            ..Default::default()
        };
        let mut validator = EntryValidator::new(&config, &dest);
        let hardlink = EntryType::Hardlink {
            target: PathBuf::from("results.json"),
        };

        let result = validator.validate_entry(Path::new("copy.json"), &hardlink, 0, None);
        assert!(matches!(
            result,
            Err(ReportError::UnsafeArchiveEntry { .. })
        ));

        std::fs::write(temp.path().join("results.json"), b"{}").unwrap();
        let entry = validator
            .validate_entry(Path::new("copy.json"), &hardlink, 0, None)
            .unwrap();
        assert!(matches!(
            entry.entry_type,
            ValidatedEntryType::Hardlink { .. }
        ));
    }

    #[test]
    fn test_hardlink_escape_rejected() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig {
            allow_hardlinks: true,
            ..Default::default()
        };
        let mut validator = EntryValidator::new(&config, &dest);

        let result = validator.validate_entry(
            Path::new("passwd"),
            &EntryType::Hardlink {
                target: PathBuf::from("../../etc/passwd"),
            },
            0,
            None,
        );
        match result {
            Err(ReportError::UnsafeArchiveEntry { path, reason }) => {
                assert_eq!(path, PathBuf::from("passwd"));
                assert!(reason.contains("hardlink target"));
            }
            other => panic!("expected UnsafeArchiveEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_quota_enforced_across_entries() {
        let (_temp, dest) = create_test_dest();
        let config = ExtractionConfig {
            max_file_count: 1,
            ..Default::default()
        };
        let mut validator = EntryValidator::new(&config, &dest);

        assert!(
            validator
                .validate_entry(Path::new("a.json"), &EntryType::File, 1, None)
                .is_ok()
        );
        let result = validator.validate_entry(Path::new("b.json"), &EntryType::File, 1, None);
        assert!(matches!(result, Err(ReportError::QuotaExceeded { .. })));
    }
}
