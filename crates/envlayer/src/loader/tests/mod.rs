//! Tests for the dotenv loader and typed reads.
//!
//! Responsibilities:
//! - Test `Loader::load` against `MemoryEnv` (tags, overwrite, hook, gate).
//! - Test typed reads and fallbacks.
//! - Test the real process environment round trip.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and `temp_env`.
//! - Fixture files live in `tempfile` directories cleaned up on drop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::MemoryEnv;

mod typed_tests;

/// Write `content` to `dir/name` and return the path.
pub fn write_env(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write dotenv fixture");
    path
}

/// Build an in-memory store from pairs.
pub fn memory(pairs: &[(&str, &str)]) -> MemoryEnv {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}
