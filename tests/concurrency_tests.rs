//! Concurrent access tests.
//!
//! Hammers a shared store from several threads while scans, sweeps and
//! persistence run alongside, then checks the data that must be untouched.

use memostore::{GarbageCollector, MemoStore};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const KEYS_PER_THREAD: usize = 500;

#[test]
fn test_per_thread_read_your_writes() {
    let store = Arc::new(MemoStore::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    let key = format!("t{t}:{i}");
                    store.set(key.clone(), i, 0);
                    assert_eq!(store.get(&key), Some(i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), THREADS * KEYS_PER_THREAD);
}

#[test]
fn test_persist_during_writes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cache_persist.bin");

    let store = Arc::new(MemoStore::new());
    for i in 0..100 {
        store.set(format!("base:{i}"), i, 0);
    }

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..2_000 {
                store.set(format!("extra:{}", i % 50), i, 60);
                store.delete("extra:", &[(i % 7).to_string()]);
            }
        })
    };

    for _ in 0..10 {
        store.persist(&path).unwrap();
    }
    writer.join().unwrap();

    // Whatever the scan saw of the churn, the stable keys are all there
    let restored: MemoStore<i32> = MemoStore::new();
    let loaded = restored.restore(&path).unwrap();
    assert!(loaded >= 100);
    for i in 0..100 {
        assert_eq!(restored.get(&format!("base:{i}")), Some(i));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_collector_runs_alongside_writers() {
    let store: Arc<MemoStore<u64>> = Arc::new(MemoStore::new());
    let gc = GarbageCollector::spawn(Arc::clone(&store), Duration::from_millis(5));

    let writers: Vec<_> = (0..4u64)
        .map(|t| {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || {
                for i in 0..1_000 {
                    store.set(format!("w{t}:{i}"), i, 0);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }
    gc.shutdown().await;

    // Permanent entries are never swept
    assert_eq!(store.len(), 4_000);
    assert_eq!(store.get("w2:999"), Some(999));
}
