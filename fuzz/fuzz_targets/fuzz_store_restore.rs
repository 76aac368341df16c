//! Fuzz target for restoring a store from an arbitrary file.
//!
//! This fuzzer tests that:
//! 1. `MemoStore::restore` never panics on arbitrary file contents
//! 2. A failed restore leaves the existing entries in place
//! 3. The file is removed after every restore attempt
//!
//! Run with: `cargo +nightly fuzz run fuzz_store_restore`

#![no_main]

use libfuzzer_sys::fuzz_target;
use memostore::MemoStore;

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let path = dir.path().join("cache_persist.bin");
    if std::fs::write(&path, data).is_err() {
        return;
    }

    let store: MemoStore<String> = MemoStore::new();
    store.set("sentinel", "kept".to_string(), 0);

    if store.restore(&path).is_err() {
        assert_eq!(store.len(), 1);
    }
    assert!(store.get("sentinel").is_some());
    assert!(!path.exists());
});
