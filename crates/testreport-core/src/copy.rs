//! Entry data copy with a reusable buffer.
//!
//! Unlike `std::io::copy`, failures on the read side are reported as archive
//! read errors (a truncated or corrupt xz stream surfaces here) while
//! failures on the write side stay I/O errors.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ReportError;
use crate::error::QuotaResource;

/// Buffer size for entry copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable copy buffer, allocated once per extraction.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies all data from `reader` to `writer` and returns the byte count.
///
/// # Errors
///
/// - `ReportError::ArchiveRead` if reading fails
/// - `ReportError::Io` if writing fails
/// - `ReportError::QuotaExceeded` if the byte count overflows
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, ReportError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ReportError::ArchiveRead(format!(
                    "failed to read entry data: {e}"
                )));
            }
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or(ReportError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow,
            })?;
    }

    Ok(total)
}
