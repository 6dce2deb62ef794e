//! File permission sanitization.

/// Permission bits kept from archive headers (`rwxrwxrwx`).
const PERMISSION_MASK: u32 = 0o777;

/// Strips setuid, setgid, sticky, and file-type bits from an archive mode.
///
/// # Examples
///
/// ```
/// use testreport_core::security::sanitize_permissions;
///
/// assert_eq!(sanitize_permissions(0o4755), 0o755);
/// assert_eq!(sanitize_permissions(0o100_644), 0o644);
/// ```
#[must_use]
pub const fn sanitize_permissions(mode: u32) -> u32 {
    mode & PERMISSION_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_modes_unchanged() {
        assert_eq!(sanitize_permissions(0o644), 0o644);
        assert_eq!(sanitize_permissions(0o755), 0o755);
        assert_eq!(sanitize_permissions(0o600), 0o600);
    }

    #[test]
    fn test_special_bits_stripped() {
        assert_eq!(sanitize_permissions(0o4755), 0o755);
        assert_eq!(sanitize_permissions(0o2755), 0o755);
        assert_eq!(sanitize_permissions(0o1777), 0o777);
        assert_eq!(sanitize_permissions(0o7777), 0o777);
    }
}
