//! Validated safe symlink type.

use crate::ReportError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;
use super::SafePath;
use super::safe_path::resolve_link_target;

/// A symbolic link whose target resolves inside the destination directory.
///
/// The target is kept exactly as stored in the archive; only its resolved
/// location is checked. Absolute targets are always rejected, and `..` is
/// applied only after symlinks already on disk have been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeSymlink {
    link_path: PathBuf,
    target_path: PathBuf,
}

impl SafeSymlink {
    /// Validates and constructs a `SafeSymlink`.
    ///
    /// The target is resolved relative to the link's parent directory. A `..`
    /// that follows a component which is not an existing directory is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnsafeArchiveEntry` if the target is absolute or
    /// resolves outside the destination.
    pub fn validate(link: &SafePath, target: &Path, dest: &DestDir) -> Result<Self> {
        if target.is_absolute() {
            return Err(ReportError::unsafe_entry(
                link.as_path(),
                format!("absolute symlink target {}", target.display()),
            ));
        }

        let link_abs = dest.join(link);
        let parent = link_abs.parent().unwrap_or_else(|| dest.as_path());
        let Some(resolved) = resolve_link_target(parent, target) else {
            return Err(ReportError::unsafe_entry(
                link.as_path(),
                format!("symlink target {} cannot be resolved", target.display()),
            ));
        };

        if !dest.contains(&resolved) {
            return Err(ReportError::unsafe_entry(
                link.as_path(),
                format!(
                    "symlink target {} resolves outside the extraction directory",
                    target.display()
                ),
            ));
        }

        Ok(Self {
            link_path: link.as_path().to_path_buf(),
            target_path: target.to_path_buf(),
        })
    }

    /// Returns the link location, relative to the destination.
    #[inline]
    #[must_use]
    pub fn link_path(&self) -> &Path {
        &self.link_path
    }

    /// Returns the target as stored in the archive.
    #[inline]
    #[must_use]
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}
