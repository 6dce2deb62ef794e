//! Extraction quota tracking and validation.

use crate::ExtractionConfig;
use crate::ReportError;
use crate::Result;
use crate::error::QuotaResource;

/// Tracks resource usage during extraction.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    entries: usize,
    bytes: u64,
}

impl QuotaTracker {
    /// Creates a new quota tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one entry of `size` bytes. Directories and links pass 0.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::QuotaExceeded` if any limit would be exceeded.
    /// The tracker is left unchanged in that case.
    pub fn record_entry(&mut self, size: u64, config: &ExtractionConfig) -> Result<()> {
        let entries = self.entries + 1;
        if entries > config.max_file_count {
            return Err(ReportError::QuotaExceeded {
                resource: QuotaResource::FileCount {
                    current: entries,
                    max: config.max_file_count,
                },
            });
        }

        if size > config.max_file_size {
            return Err(ReportError::QuotaExceeded {
                resource: QuotaResource::FileSize {
                    size,
                    max: config.max_file_size,
                },
            });
        }

        let bytes = self
            .bytes
            .checked_add(size)
            .ok_or(ReportError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow,
            })?;
        if bytes > config.max_total_size {
            return Err(ReportError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: bytes,
                    max: config.max_total_size,
                },
            });
        }

        self.entries = entries;
        self.bytes = bytes;
        Ok(())
    }

    /// Returns the number of entries recorded.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Returns the total bytes recorded.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}
