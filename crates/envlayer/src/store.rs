//! Environment stores the loader reads from and writes to.
//!
//! Responsibilities:
//! - Define the `EnvStore` seam: point reads, full snapshots, bulk writes.
//! - Provide `ProcessEnv` (the real process environment) and `MemoryEnv`
//!   (an in-memory map for tests and embedding).
//!
//! Does NOT handle:
//! - Deciding what to write (see `merge` and `loader`).
//!
//! Invariants:
//! - The merge engine takes snapshots before merging and writes once, after.
//! - `ProcessEnv` snapshots skip entries that are not valid UTF-8.

use crate::types::EnvMap;

/// Key/value store holding environment variables.
pub trait EnvStore {
    fn get(&self, name: &str) -> Option<String>;

    fn snapshot(&self) -> EnvMap;

    /// Set every pair of `delta`, replacing existing values.
    fn apply(&mut self, delta: &EnvMap);
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn snapshot(&self) -> EnvMap {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn apply(&mut self, delta: &EnvMap) {
        for (name, value) in delta {
            // SAFETY: loading runs once during single-threaded bootstrap, before
            // other threads read the environment.
            unsafe {
                std::env::set_var(name, value);
            }
        }
    }
}

/// In-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: EnvMap,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars(&self) -> &EnvMap {
        &self.vars
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl From<EnvMap> for MemoryEnv {
    fn from(vars: EnvMap) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn snapshot(&self) -> EnvMap {
        self.vars.clone()
    }

    fn apply(&mut self, delta: &EnvMap) {
        self.vars
            .extend(delta.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
