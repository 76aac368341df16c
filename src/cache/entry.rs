//! Stored value with its expiration time.

use crate::constants::NO_EXPIRY;

/// Current Unix time in seconds.
pub(crate) fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Expiry timestamp for a TTL given in seconds. Non-positive TTLs never expire.
pub(crate) fn expiry_from_ttl(ttl_secs: i64, now: i64) -> i64 {
    if ttl_secs > 0 {
        now.saturating_add(ttl_secs)
    } else {
        NO_EXPIRY
    }
}

/// A value tagged with an absolute expiry.
///
/// `expires_at` is a Unix timestamp in seconds; zero or negative means the
/// entry never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    value: V,
    expires_at: i64,
}

impl<V> Entry<V> {
    /// Creates an entry expiring `ttl_secs` from now.
    pub fn new(value: V, ttl_secs: i64) -> Self {
        Self {
            value,
            expires_at: expiry_from_ttl(ttl_secs, now_unix()),
        }
    }

    /// Creates an entry with an explicit expiry timestamp.
    pub fn with_expiry(value: V, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// Creates an entry that never expires.
    pub fn permanent(value: V) -> Self {
        Self::with_expiry(value, NO_EXPIRY)
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Returns true if the entry has no expiry.
    pub fn is_permanent(&self) -> bool {
        self.expires_at <= NO_EXPIRY
    }

    /// Checks if this entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_unix())
    }

    /// Checks expiry against a given Unix timestamp.
    pub fn is_expired_at(&self, now: i64) -> bool {
        is_expired_at(self.expires_at, now)
    }
}

/// An entry is logically absent once `now` has passed its expiry.
pub(crate) fn is_expired_at(expires_at: i64, now: i64) -> bool {
    expires_at > NO_EXPIRY && expires_at < now
}
