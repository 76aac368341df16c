//! Error types for snapshot persistence.
//!
//! Only persist and restore can fail. Every other store operation reports
//! a miss as `None` rather than as an error.

use std::path::{Path, PathBuf};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Persistence errors with the path involved.
///
/// None of these are fatal to the in-memory store: callers are expected to
/// log and continue.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Encoding a value or the snapshot container failed.
    #[error("failed to serialize cache: {source}")]
    Serialization {
        #[source]
        source: bincode::Error,
    },

    /// Writing the snapshot file failed.
    #[error("failed to write cache file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is corrupt or was written by an incompatible version.
    #[error("unknown cache file format in {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    /// The snapshot file exists but could not be read.
    #[error("failed to read cache file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a serialization error.
    pub fn serialization(source: bincode::Error) -> Self {
        Self::Serialization { source }
    }

    /// Create a write error for `path`.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a format error for `path`.
    pub fn format(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a read error for `path`.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if this is a decode failure.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
