//! Shared constants.

/// Default snapshot file name.
pub const DEFAULT_CACHE_FILE: &str = "cache_persist.bin";

/// Default interval between background garbage collection sweeps.
pub const DEFAULT_GC_INTERVAL_SECS: u64 = 60;

/// Leading bytes of every snapshot file.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"MEMO";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Permission bits applied to snapshot files on Unix.
pub const SNAPSHOT_FILE_MODE: u32 = 0o644;

/// Expiry sentinel for entries that never expire.
pub const NO_EXPIRY: i64 = 0;
