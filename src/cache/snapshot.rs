//! On-disk snapshot container.
//!
//! A snapshot file is the 4-byte magic `MEMO`, a little-endian `u32` format
//! version, then the bincode-encoded [`Snapshot`]. Values are stored as
//! pre-encoded byte payloads, so a snapshot can be read, inspected and pruned
//! without knowing the value type it was written with.

use super::entry;
use crate::constants::{SNAPSHOT_FILE_MODE, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use crate::error::{Error, Result};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + std::mem::size_of::<u32>();

/// Bincode configuration shared by the container and the value payloads.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encodes a single value payload.
pub(crate) fn encode_value<V: Serialize>(value: &V) -> Result<Vec<u8>> {
    codec().serialize(value).map_err(Error::serialization)
}

/// Decodes a single value payload read from `path`.
pub(crate) fn decode_value<V: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<V> {
    codec()
        .deserialize(bytes)
        .map_err(|e| Error::format(path, format!("invalid value payload: {e}")))
}

/// A persisted entry: expiry plus the encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Unix timestamp in seconds, `<= 0` for no expiry.
    pub expires_at: i64,
    /// Bincode-encoded value.
    pub value: Vec<u8>,
}

impl SnapshotEntry {
    /// Encodes `value` into a persisted entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be encoded.
    pub fn encode<V: Serialize>(value: &V, expires_at: i64) -> Result<Self> {
        Ok(Self {
            expires_at,
            value: encode_value(value)?,
        })
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        entry::is_expired_at(self.expires_at, now)
    }
}

/// Every entry of a store at the moment it was persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: BTreeMap<String, SnapshotEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: SnapshotEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries expired at `now`, returning how many were removed.
    pub fn prune_expired(&mut self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Encodes the snapshot with its header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if bincode encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let body = codec().serialize(self).map_err(Error::serialization)?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&SNAPSHOT_MAGIC);
        bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Decodes snapshot bytes read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] on a bad header, an unsupported version or a
    /// corrupt body.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::format(path, "file too short for header"));
        }
        let (header, body) = bytes.split_at(HEADER_LEN);
        if header[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
            return Err(Error::format(path, "missing snapshot magic"));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&header[SNAPSHOT_MAGIC.len()..]);
        let version = u32::from_le_bytes(version);
        if version != SNAPSHOT_VERSION {
            return Err(Error::format(
                path,
                format!("unsupported snapshot version {version} (expected {SNAPSHOT_VERSION})"),
            ));
        }

        codec()
            .deserialize(body)
            .map_err(|e| Error::format(path, e.to_string()))
    }

    /// Reads and decodes a snapshot from an already opened reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if reading fails and [`Error::Format`] if
    /// decoding fails.
    pub fn read_from<R: Read>(mut reader: R, path: &Path) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::read(path, e))?;
        Self::decode(&bytes, path)
    }

    /// Reads a snapshot file without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be opened or read and
    /// [`Error::Format`] if decoding fails.
    pub fn read_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::read(path, e))?;
        Self::read_from(file, path)
    }

    /// Writes the snapshot to `path`, replacing any existing file.
    ///
    /// The bytes go to a temporary file in the target directory which is then
    /// renamed over `path`, so readers never observe a partial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails and [`Error::Write`]
    /// if any filesystem step fails.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::write(path, e))?;
        tmp.write_all(&bytes).map_err(|e| Error::write(path, e))?;
        tmp.as_file().sync_all().map_err(|e| Error::write(path, e))?;
        set_snapshot_permissions(tmp.as_file()).map_err(|e| Error::write(path, e))?;

        tmp.persist(path).map_err(|e| Error::write(path, e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_snapshot_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(SNAPSHOT_FILE_MODE))
}

#[cfg(not(unix))]
fn set_snapshot_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}
