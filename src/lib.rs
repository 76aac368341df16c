//! # memostore
//!
//! An in-process, concurrency-safe key-value cache with per-entry TTL,
//! prefix-scoped bulk operations and snapshot persistence across restarts.
//!
//! - [`MemoStore`] - the concurrent store (`DashMap` backed)
//! - [`GarbageCollector`] - optional tokio task sweeping expired entries
//! - [`Snapshot`] - the on-disk form written by `persist` and read by `restore`
//! - [`StoreConfig`] - TOML configuration
//!
//! The store is for values that are expensive to compute but safe to lose:
//! nothing is durable until [`MemoStore::persist`] is called, and memory use
//! is bounded only by the caller's keys and TTLs.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod utils;

pub use cache::{Entry, GarbageCollector, MemoStore, Snapshot, SnapshotEntry};
pub use config::StoreConfig;
pub use error::{Error, Result};
