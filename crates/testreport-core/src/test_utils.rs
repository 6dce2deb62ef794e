//! Test utilities for building tar.xz archives and results documents.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;
use std::path::Path;

use xz2::write::XzEncoder;

/// Builder for tar test archives with various entry types.
///
/// # Examples
///
/// ```
/// use testreport_core::test_utils::TarTestBuilder;
///
/// let xz_data = TarTestBuilder::new()
///     .add_directory("run/")
///     .add_file("run/results.json", b"{}")
///     .build_xz();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new tar test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink.
    #[must_use]
    pub fn add_symlink(self, path: &str, target: &str) -> Self {
        self.add_link(path, target, tar::EntryType::Symlink)
    }

    /// Adds a hardlink.
    #[must_use]
    pub fn add_hardlink(self, path: &str, target: &str) -> Self {
        self.add_link(path, target, tar::EntryType::Link)
    }

    /// Adds a FIFO entry, which extraction never writes.
    #[must_use]
    pub fn add_fifo(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Fifo);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a regular file whose name is written to the header verbatim.
    ///
    /// `tar::Builder` refuses `..` components and absolute paths, so
    /// traversal entries have to bypass its path handling. `path` must fit
    /// in the 100-byte name field.
    #[must_use]
    pub fn add_raw_path(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        let name = &mut header.as_old_mut().name;
        assert!(path.len() < name.len(), "raw path too long: {path}");
        name[..path.len()].copy_from_slice(path.as_bytes());
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Returns the uncompressed tar data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    /// Returns the xz-compressed tar data.
    #[must_use]
    pub fn build_xz(self) -> Vec<u8> {
        let tar_data = self.build();
        let mut encoder = XzEncoder::new(Vec::new(), 6);
        encoder.write_all(&tar_data).unwrap();
        encoder.finish().unwrap()
    }

    /// Writes the xz-compressed archive to `path`.
    pub fn write_xz(self, path: &Path) {
        std::fs::write(path, self.build_xz()).unwrap();
    }

    fn add_link(mut self, path: &str, target: &str, kind: tar::EntryType) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(kind);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a results document with one record per `(id, status, duration)`.
///
/// # Examples
///
/// ```
/// use testreport_core::test_utils::results_json;
///
/// let json = results_json(Some("22.04"), &[("t1", "pass", 1.5)]);
/// assert!(json.contains("\"results\""));
/// ```
#[must_use]
pub fn results_json(description: Option<&str>, records: &[(&str, &str, f64)]) -> String {
    let results: Vec<serde_json::Value> = records
        .iter()
        .map(|(id, status, duration)| {
            serde_json::json!({ "id": id, "status": status, "duration": duration })
        })
        .collect();

    let mut document = serde_json::json!({ "results": results });
    if let Some(description) = description {
        document["distribution"] = serde_json::json!({ "description": description });
    }
    document.to_string()
}
