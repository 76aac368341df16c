//! Shared formatting helpers for the CLI.

use chrono::{DateTime, Utc};

/// Format bytes in human-readable form.
///
/// # Examples
///
/// ```
/// use memostore::utils::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 bytes");
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1048576), "1.0 MB");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes == 0 {
        "0 bytes".to_string()
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Format an entry expiry timestamp.
///
/// Non-positive timestamps mean the entry never expires.
///
/// # Examples
///
/// ```
/// use memostore::utils::format_expiry;
///
/// assert_eq!(format_expiry(0), "never");
/// assert_eq!(format_expiry(-1), "never");
/// assert_eq!(format_expiry(86400), "1970-01-02T00:00:00+00:00");
/// ```
pub fn format_expiry(expires_at: i64) -> String {
    if expires_at <= crate::constants::NO_EXPIRY {
        return "never".to_string();
    }
    DateTime::<Utc>::from_timestamp(expires_at, 0)
        .map_or_else(|| format!("@{expires_at}"), |dt| dt.to_rfc3339())
}
