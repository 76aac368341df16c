//! Store configuration loaded from TOML.
//!
//! ```toml
//! persist_file = "cache_persist.bin"
//! gc_interval_secs = 60
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;

/// Configuration for a [`MemoStore`](crate::MemoStore) and its collector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Snapshot restored at startup and written at shutdown (None disables both).
    pub persist_file: Option<PathBuf>,
    /// Seconds between background garbage collection sweeps.
    pub gc_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist_file: None,
            gc_interval_secs: constants::DEFAULT_GC_INTERVAL_SECS,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the store cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero GC interval or an empty persist path.
    pub fn validate(&self) -> Result<()> {
        if self.gc_interval_secs == 0 {
            anyhow::bail!("gc_interval_secs must be greater than 0");
        }
        if let Some(path) = &self.persist_file
            && path.as_os_str().is_empty()
        {
            anyhow::bail!("persist_file must not be empty (omit it to disable persistence)");
        }
        Ok(())
    }

    #[must_use]
    pub fn with_persist_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_gc_interval(mut self, interval: Duration) -> Self {
        self.gc_interval_secs = interval.as_secs();
        self
    }

    pub fn gc_interval(&self) -> Duration {
        Duration::from_secs(self.gc_interval_secs)
    }
}
