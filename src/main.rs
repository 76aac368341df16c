//! memostore CLI: offline tools for cache snapshot files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "memostore")]
#[command(author, version, about = "Inspect and maintain memostore cache snapshots")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a snapshot file written by `MemoStore::persist`
    #[command(subcommand)]
    Snapshot(SnapshotAction),
}

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// List the entries of a snapshot without consuming it
    Inspect {
        /// Snapshot file
        file: PathBuf,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a snapshot without its expired entries
    Prune {
        /// Snapshot file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Snapshot(action) => commands::snapshot::execute(action),
    }
}

/// Initialize stdout logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
