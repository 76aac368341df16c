//! Snapshot file commands.
//!
//! - `memostore snapshot inspect <file>` - list entries, expiry and payload size
//! - `memostore snapshot prune <file>` - drop expired entries in place
//!
//! Both work on the raw snapshot container, so they never need to know the
//! value type the snapshot was written with. Neither consumes the file the
//! way `MemoStore::restore` does.

use anyhow::{Context, Result};
use chrono::Utc;
use memostore::Snapshot;
use memostore::utils::{format_bytes, format_expiry};
use serde::Serialize;
use std::path::Path;

use crate::SnapshotAction;

/// One snapshot entry as shown by `inspect`.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct EntryInfo {
    key: String,
    expires_at: i64,
    expires: String,
    expired: bool,
    size_bytes: u64,
}

/// Outcome of pruning a snapshot file.
#[derive(Debug, Default, PartialEq, Eq)]
struct PruneStats {
    kept: usize,
    dropped: usize,
}

/// Execute a snapshot command.
pub fn execute(action: SnapshotAction) -> Result<()> {
    match action {
        SnapshotAction::Inspect { file, json } => {
            let snapshot = Snapshot::read_file(&file)
                .with_context(|| format!("Failed to load snapshot {}", file.display()))?;
            let entries = describe(&snapshot, Utc::now().timestamp());

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            let total: u64 = entries.iter().map(|e| e.size_bytes).sum();
            let expired = entries.iter().filter(|e| e.expired).count();

            println!("Snapshot: {}", file.display());
            println!("Entries:  {} ({expired} expired)", entries.len());
            println!("Payload:  {}", format_bytes(total));
            if !entries.is_empty() {
                println!();
            }
            for entry in &entries {
                let status = if entry.expired { "expired" } else { "live" };
                println!(
                    "  {:<40} {:<8} {:<26} {}",
                    entry.key,
                    status,
                    entry.expires,
                    format_bytes(entry.size_bytes)
                );
            }
        },
        SnapshotAction::Prune { file } => {
            let stats = prune_file(&file, Utc::now().timestamp())?;
            if stats.dropped == 0 {
                println!("No expired entries in {}. Nothing to prune.", file.display());
            } else {
                println!("Snapshot pruned successfully");
                println!("  Entries dropped: {}", stats.dropped);
                println!("  Entries kept:    {}", stats.kept);
            }
        },
    }

    Ok(())
}

fn describe(snapshot: &Snapshot, now: i64) -> Vec<EntryInfo> {
    snapshot
        .entries
        .iter()
        .map(|(key, entry)| EntryInfo {
            key: key.clone(),
            expires_at: entry.expires_at,
            expires: format_expiry(entry.expires_at),
            expired: entry.is_expired_at(now),
            size_bytes: entry.value.len() as u64,
        })
        .collect()
}

fn prune_file(path: &Path, now: i64) -> Result<PruneStats> {
    let mut snapshot = Snapshot::read_file(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    let dropped = snapshot.prune_expired(now);
    if dropped > 0 {
        snapshot
            .write_file(path)
            .with_context(|| format!("Failed to rewrite snapshot {}", path.display()))?;
        tracing::debug!(dropped, path = %path.display(), "Pruned expired snapshot entries");
    }

    Ok(PruneStats {
        kept: snapshot.len(),
        dropped,
    })
}
