//! Background garbage collection task.

use super::store::MemoStore;
use crate::config::StoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Periodically sweeps expired entries out of a shared store.
///
/// The first sweep runs one full interval after spawning. The task stops when
/// [`GarbageCollector::shutdown`] is awaited or the collector is dropped.
///
/// # Example
///
/// ```no_run
/// use memostore::{GarbageCollector, MemoStore};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = Arc::new(MemoStore::<String>::new());
/// let gc = GarbageCollector::spawn(Arc::clone(&store), Duration::from_secs(60));
/// // ...
/// gc.shutdown().await;
/// # }
/// ```
#[derive(Debug)]
pub struct GarbageCollector {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl GarbageCollector {
    /// Spawns the collector on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime or if `interval` is zero.
    pub fn spawn<V>(store: Arc<MemoStore<V>>, interval: Duration) -> Self
    where
        V: Send + Sync + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(store, interval, shutdown_rx));

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Spawns the collector with the interval from `config`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime or if the configured
    /// interval is zero (rejected by [`StoreConfig::validate`]).
    pub fn from_config<V>(store: Arc<MemoStore<V>>, config: &StoreConfig) -> Self
    where
        V: Send + Sync + 'static,
    {
        Self::spawn(store, config.gc_interval())
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "Garbage collector task failed");
        }
    }
}

impl Drop for GarbageCollector {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn run<V>(
    store: Arc<MemoStore<V>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    V: Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately
    ticker.tick().await;

    tracing::debug!(interval_secs = interval.as_secs(), "Garbage collector started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.garbage_collect();
                if removed > 0 {
                    tracing::debug!(removed, "Garbage collection sweep finished");
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    tracing::debug!("Garbage collector stopped");
}
