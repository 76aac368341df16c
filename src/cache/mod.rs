//! In-process TTL cache with snapshot persistence.
//!
//! Values are kept in a concurrent map, each tagged with an optional expiry.
//! Expired entries are invisible to reads immediately and are physically
//! removed by garbage collection sweeps, either on demand or from a
//! background [`GarbageCollector`].
//!
//! # Example
//!
//! ```no_run
//! use memostore::MemoStore;
//! use std::path::Path;
//!
//! # fn main() -> memostore::Result<()> {
//! // Startup: restore (and consume) the previous snapshot if any
//! let store: MemoStore<String> = MemoStore::open(Some(Path::new("cache_persist.bin")));
//!
//! store.set("session:123", "alice".to_string(), 3600);
//! store.sets([("a", "1".to_string()), ("b", "2".to_string())], "setting:");
//!
//! let (found, missing) = store.gets(&["a", "b", "c"], "setting:");
//! assert_eq!(found.len(), 2);
//! assert_eq!(missing, vec!["c".to_string()]);
//!
//! // Shutdown: write every live entry back to disk
//! store.persist(Path::new("cache_persist.bin"))?;
//! # Ok(())
//! # }
//! ```

mod entry;
mod gc;
mod snapshot;
mod store;


pub use entry::Entry;
pub use gc::GarbageCollector;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use store::MemoStore;
