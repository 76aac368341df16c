//! Fuzz target for snapshot decoding.
//!
//! This fuzzer tests that:
//! 1. Decoding arbitrary bytes never panics
//! 2. Inputs with a valid header but garbage bodies are rejected cleanly
//! 3. Anything that decodes re-encodes to bytes that decode to the same snapshot
//!
//! Run with: `cargo +nightly fuzz run fuzz_snapshot_decode`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memostore::Snapshot;
use std::path::Path;

/// Structured input for snapshot fuzzing.
#[derive(Arbitrary, Debug)]
struct SnapshotInput {
    /// Raw bytes decoded as a whole file
    data: Vec<u8>,
    /// Prepend a valid header to `data`
    with_header: bool,
}

fuzz_target!(|input: SnapshotInput| {
    let mut bytes = Vec::with_capacity(input.data.len() + 8);
    if input.with_header {
        bytes.extend_from_slice(&memostore::constants::SNAPSHOT_MAGIC);
        bytes.extend_from_slice(&memostore::constants::SNAPSHOT_VERSION.to_le_bytes());
    }
    bytes.extend_from_slice(&input.data);

    let path = Path::new("fuzz.bin");
    if let Ok(snapshot) = Snapshot::decode(&bytes, path) {
        let encoded = snapshot.encode().expect("decoded snapshot must re-encode");
        let again = Snapshot::decode(&encoded, path).expect("re-encoded snapshot must decode");
        assert_eq!(snapshot, again);
    }
});
