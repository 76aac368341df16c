//! CLI command implementations.
//!
//! - [`snapshot`] - snapshot inspection and pruning

pub mod snapshot;
