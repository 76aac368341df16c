//! The concurrent TTL store.

use super::entry::{self, Entry};
use super::snapshot::{self, Snapshot, SnapshotEntry};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;

/// In-memory key-value store with per-entry expiry.
///
/// Reads treat expired entries as absent without removing them; memory is
/// reclaimed by [`MemoStore::garbage_collect`]. Share a store between threads
/// with `Arc<MemoStore<V>>`.
///
/// # Thread Safety
///
/// Per-key operations are atomic. Scans (`delete_prefix`, `delete_all`,
/// `garbage_collect`, `persist`) may or may not observe writes made
/// concurrently with them.
///
/// # Example
///
/// ```
/// use memostore::MemoStore;
///
/// let store = MemoStore::new();
/// store.set("thumb:1", vec![1u8, 2, 3], 60);
/// assert_eq!(store.get("thumb:1"), Some(vec![1, 2, 3]));
/// ```
#[derive(Debug)]
pub struct MemoStore<V> {
    data: DashMap<String, Entry<V>>,
}

impl<V> Default for MemoStore<V> {
    fn default() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl<V> MemoStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// A positive `ttl_secs` makes the entry expire that many seconds from
    /// now; zero or negative means it never expires.
    pub fn set(&self, key: impl Into<String>, value: V, ttl_secs: i64) {
        self.data.insert(key.into(), Entry::new(value, ttl_secs));
    }

    /// Stores every `(key, value)` under `prefix + key` with no expiry.
    pub fn sets<K, I>(&self, values: I, prefix: &str)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in values {
            let key: &str = key.as_ref();
            self.data.insert(format!("{prefix}{key}"), Entry::permanent(value));
        }
    }

    /// Inserts a prepared entry as is.
    pub(crate) fn insert_entry(&self, key: impl Into<String>, entry: Entry<V>) {
        self.data.insert(key.into(), entry);
    }

    /// Returns true if `key` is present and not expired.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Deletes `prefix + key` for every key given.
    ///
    /// With no keys, deletes every key starting with `prefix` instead; an
    /// empty prefix then clears the store. Returns the number of entries
    /// removed.
    pub fn delete<S: AsRef<str>>(&self, prefix: &str, keys: &[S]) -> usize {
        if keys.is_empty() {
            return self.delete_prefix(prefix);
        }

        keys.iter()
            .filter(|key| {
                let key: &str = (*key).as_ref();
                self.data.remove(&format!("{prefix}{key}")).is_some()
            })
            .count()
    }

    /// Deletes every key starting with `prefix`.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let mut removed = 0;
        self.data.retain(|key, _| {
            if key.starts_with(prefix) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Removes every entry.
    pub fn delete_all(&self) -> usize {
        let removed = self.data.len();
        self.data.clear();
        removed
    }

    /// Physically removes every expired entry, returning how many were removed.
    ///
    /// Reads never depend on this running; it only reclaims memory.
    pub fn garbage_collect(&self) -> usize {
        let now = entry::now_unix();
        let mut removed = 0;
        self.data.retain(|key, entry| {
            if entry.is_expired_at(now) {
                tracing::debug!(key = %key, "Cache entry garbage collected");
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of stored entries, including expired ones not yet collected.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<V: Clone> MemoStore<V> {
    /// Returns the value for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.is_expired() {
            None
        } else {
            Some(entry.value().value().clone())
        }
    }

    /// Looks up `prefix + key` for each key.
    ///
    /// Hits are returned under the unprefixed key; misses are returned in
    /// input order.
    pub fn gets<S: AsRef<str>>(
        &self,
        keys: &[S],
        prefix: &str,
    ) -> (HashMap<String, V>, Vec<String>) {
        let mut found = HashMap::with_capacity(keys.len());
        let mut missing = Vec::new();

        for key in keys {
            let key: &str = key.as_ref();
            match self.get(&format!("{prefix}{key}")) {
                Some(value) => {
                    found.insert(key.to_string(), value);
                },
                None => missing.push(key.to_string()),
            }
        }

        (found, missing)
    }
}

impl<V: DeserializeOwned> MemoStore<V> {
    /// Creates a store, restoring it from `persist_file` when given.
    ///
    /// A failed restore is logged and leaves the store empty.
    pub fn open(persist_file: Option<&Path>) -> Self {
        let store = Self::new();

        if let Some(path) = persist_file.filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = store.restore(path)
        {
            tracing::warn!(error = %e, "Failed to restore cache from disk");
        }

        store
    }

    /// Creates a store from configuration, restoring the configured snapshot.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::open(config.persist_file.as_deref())
    }

    /// Loads the snapshot at `path` into the store and deletes the file.
    ///
    /// A missing file is not an error. Entries that have expired since the
    /// snapshot was taken are skipped. Once the file has been opened it is
    /// removed whether or not decoding succeeds, so a snapshot is never
    /// replayed twice. Returns the number of entries loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file's existence cannot be checked or it
    /// cannot be opened or read, and
    /// [`Error::Format`] if it cannot be decoded. On error no entries are
    /// loaded.
    pub fn restore(&self, path: &Path) -> Result<usize> {
        // Only a definite "not found" skips restore
        if !path.try_exists().map_err(|e| Error::read(path, e))? {
            return Ok(0);
        }

        let file = File::open(path).map_err(|e| Error::read(path, e))?;
        let result = Snapshot::read_from(file, path).and_then(|s| self.load_snapshot(s, path));

        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove restored cache file"
            );
        }

        let loaded = result?;
        tracing::info!(
            count = loaded,
            path = %path.display(),
            "Restored items into memory cache"
        );
        Ok(loaded)
    }

    /// Decodes every live entry before inserting any of them.
    fn load_snapshot(&self, snapshot: Snapshot, path: &Path) -> Result<usize> {
        let now = entry::now_unix();
        let mut live = Vec::with_capacity(snapshot.len());

        for (key, persisted) in snapshot.entries {
            if persisted.is_expired_at(now) {
                tracing::debug!(key = %key, "Persisted cache entry is expired");
                continue;
            }
            let value = snapshot::decode_value(&persisted.value, path)?;
            live.push((key, Entry::with_expiry(value, persisted.expires_at)));
        }

        let loaded = live.len();
        for (key, entry) in live {
            self.insert_entry(key, entry);
        }
        Ok(loaded)
    }
}

impl<V: Serialize> MemoStore<V> {
    /// Builds a snapshot of every entry not expired at call time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if a value cannot be encoded.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let now = entry::now_unix();
        let mut snapshot = Snapshot::new();

        for item in &self.data {
            if item.is_expired_at(now) {
                continue;
            }
            snapshot.insert(
                item.key().clone(),
                SnapshotEntry::encode(item.value().value(), item.expires_at())?,
            );
        }

        Ok(snapshot)
    }

    /// Writes every live entry to `path`, replacing the file if it exists.
    ///
    /// Returns the number of entries written. The in-memory store is left
    /// unchanged whether or not this succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails and [`Error::Write`]
    /// if the file cannot be written.
    pub fn persist(&self, path: &Path) -> Result<usize> {
        let snapshot = self.snapshot()?;
        snapshot.write_file(path)?;

        tracing::info!(
            count = snapshot.len(),
            path = %path.display(),
            "Persisted memory cache to disk"
        );
        Ok(snapshot.len())
    }
}
