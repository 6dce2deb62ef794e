//! Validated safe path type for archive extraction.

use crate::ExtractionConfig;
use crate::ReportError;
use crate::Result;
use crate::error::QuotaResource;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// An archive entry path proven to resolve inside the destination directory.
///
/// The stored path is relative to the destination. An empty `SafePath`
/// denotes the destination directory itself (e.g. a `./` entry).
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<PathBuf>` implementation
/// - Resolution follows `..` and existing symlinks before the containment
///   check, so `a/../b` is accepted while `../x` and `link-to-etc/passwd` are
///   not
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use testreport_core::ExtractionConfig;
/// use testreport_core::types::DestDir;
/// use testreport_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new(PathBuf::from("/tmp"))?;
/// let config = ExtractionConfig::default();
///
/// let safe = SafePath::validate(&PathBuf::from("foo/bar.json"), &dest, &config)?;
/// assert!(SafePath::validate(&PathBuf::from("../etc/passwd"), &dest, &config).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath`.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject null bytes
    /// 2. Join onto the destination and normalize `.` and `..` lexically
    /// 3. Canonicalize the deepest existing ancestor (resolves symlinks)
    /// 4. Require the result to equal or descend from the destination,
    ///    compared per component
    /// 5. Enforce the configured maximum depth
    ///
    /// # Errors
    ///
    /// - `ReportError::UnsafeArchiveEntry` if the path escapes or contains
    ///   null bytes
    /// - `ReportError::QuotaExceeded` if the path is too deep
    pub fn validate(path: &Path, dest: &DestDir, config: &ExtractionConfig) -> Result<Self> {
        if has_null_bytes(path) {
            return Err(ReportError::unsafe_entry(path, "path contains null bytes"));
        }

        let resolved = resolve_existing(&normalize(&dest.as_path().join(path)));

        let relative = resolved
            .strip_prefix(dest.as_path())
            .map_err(|_| ReportError::unsafe_entry(path, "resolves outside the extraction directory"))?
            .to_path_buf();

        let depth = relative.components().count();
        if depth > config.max_path_depth {
            return Err(ReportError::QuotaExceeded {
                resource: QuotaResource::PathDepth {
                    depth,
                    max: config.max_path_depth,
                },
            });
        }

        Ok(Self(relative))
    }

    /// Returns `true` if this path denotes the destination directory itself.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Lexically normalizes an absolute path: drops `.`, and lets `..` remove the
/// preceding normal component. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

/// Replaces the longest existing prefix of `path` by its canonical form.
///
/// The remainder never contains `.` or `..` because `path` is normalized, so
/// appending it cannot climb out of the canonical prefix.
fn resolve_existing(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            return match path.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => canonical.join(rest),
                _ => canonical,
            };
        }
    }
    path.to_path_buf()
}

const MAX_SYMLINK_HOPS: usize = 40;

/// Resolves `target` against the directory `base` the way the kernel would,
/// following symlinks that already exist before `..` is applied.
///
/// `base` must be free of symlinks; components of it that do not exist yet
/// are treated as directories. Returns `None` when `..` follows a component
/// that is not an existing directory, since a later entry could still place
/// a symlink there, or when symlinks nest too deeply.
pub(crate) fn resolve_link_target(base: &Path, target: &Path) -> Option<PathBuf> {
    let mut resolved = base.to_path_buf();
    let mut pending = reversed_components(target);
    let mut is_dir = true;
    let mut hops = 0;

    while let Some(item) = pending.pop() {
        match item.components().next() {
            Some(Component::Prefix(_)) => {
                resolved = item;
                is_dir = true;
            }
            Some(Component::RootDir) => {
                resolved.push(item);
                is_dir = true;
            }
            Some(Component::CurDir) | None => {}
            Some(Component::ParentDir) => {
                if !is_dir {
                    return None;
                }
                resolved.pop();
            }
            Some(Component::Normal(name)) => {
                let candidate = resolved.join(name);
                match std::fs::symlink_metadata(&candidate) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        hops += 1;
                        if hops > MAX_SYMLINK_HOPS {
                            return None;
                        }
                        let link_target = std::fs::read_link(&candidate).ok()?;
                        pending.extend(reversed_components(&link_target));
                        is_dir = true;
                    }
                    Ok(meta) => {
                        is_dir = meta.is_dir();
                        resolved = candidate;
                    }
                    Err(_) => {
                        is_dir = false;
                        resolved = candidate;
                    }
                }
            }
        }
    }

    Some(resolved)
}

fn reversed_components(path: &Path) -> Vec<PathBuf> {
    path.components()
        .rev()
        .map(|component| PathBuf::from(component.as_os_str()))
        .collect()
}

/// Checks if a path contains null bytes.
#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

/// Checks if a path contains null bytes.
#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}
