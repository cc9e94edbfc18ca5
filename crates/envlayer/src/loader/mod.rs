//! Dotenv loader and typed environment reads.
//!
//! Responsibilities:
//! - Provide the builder-pattern `Loader` that collects sources, merges them
//!   and writes the delta into an `EnvStore`.
//! - Compute built-in tags (environment name, CI provider, OS).
//! - Read variables back with typed casters and defaults.
//!
//! Does NOT handle:
//! - The dotenv grammar (see `parser`).
//! - Merge precedence rules (see `merge`).
//!
//! Invariants / Assumptions:
//! - Loading is fail-fast: the first unreadable or malformed file aborts the
//!   call before anything is written.
//! - The `ENVLAYER_DISABLED` variable is checked before any file is read.

mod builder;
mod error;
mod tags;
mod typed;

#[cfg(test)]
mod tests;

pub use builder::Loader;
pub use error::{EnvError, LoadError};
pub use tags::builtin_tags;
pub use typed::{Fallback, env, env_or, get_typed, get_typed_or};
