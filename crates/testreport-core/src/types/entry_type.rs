//! Archive entry type enumeration.

use std::path::PathBuf;

/// Type of entry in an archive.
///
/// Link targets carried here come straight from the archive header and have
/// NOT been validated.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use testreport_core::types::EntryType;
///
/// let kind = EntryType::from_tar(tar::EntryType::Symlink, Some(PathBuf::from("../target")));
/// assert_eq!(
///     kind,
///     Some(EntryType::Symlink {
///         target: PathBuf::from("../target"),
///     })
/// );
/// assert!(EntryType::Directory.is_directory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry.
    Symlink {
        /// The symlink target path (not yet validated).
        target: PathBuf,
    },

    /// Hard link entry.
    Hardlink {
        /// The hardlink target path (not yet validated).
        target: PathBuf,
    },
}

impl EntryType {
    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Maps a tar header type to an `EntryType`.
    ///
    /// Returns `None` for kinds that are never written to disk (devices,
    /// FIFOs). Link kinds take the target from `link_name`.
    #[must_use]
    pub fn from_tar(kind: tar::EntryType, link_name: Option<PathBuf>) -> Option<Self> {
        match kind {
            tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::GNUSparse => {
                Some(Self::File)
            }
            tar::EntryType::Directory => Some(Self::Directory),
            tar::EntryType::Symlink => Some(Self::Symlink {
                target: link_name.unwrap_or_default(),
            }),
            tar::EntryType::Link => Some(Self::Hardlink {
                target: link_name.unwrap_or_default(),
            }),
            _ => None,
        }
    }
}
