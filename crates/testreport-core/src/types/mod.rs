//! Type-safe wrappers for archive extraction operations.
//!
//! The security types here are validated upon construction and cannot be
//! created from raw paths without going through validation.

pub mod dest_dir;
pub mod entry_type;
pub mod safe_path;
pub mod safe_symlink;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
pub use safe_path::SafePath;
pub use safe_symlink::SafeSymlink;
