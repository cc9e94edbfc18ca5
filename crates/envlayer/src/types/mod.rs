//! Data model shared by the parser, collector and merge engine.
//!
//! Responsibilities:
//! - Define parsed entries (`Entry`, `Value`, `Chunk`).
//! - Define the recursive source tree (`SourceSpec`) and enabled tags (`TagSet`).
//!
//! Does NOT handle:
//! - Parsing, collection or merging (see `parser`, `sources`, `merge`).
//!
//! Invariants:
//! - All types are plain data: serializable and free of captured behaviour.

mod source;
mod tags;
mod value;

pub use source::SourceSpec;
pub use tags::TagSet;
pub use value::{Chunk, Entry, Value};

/// Variable name to value mapping, used for snapshots and deltas.
pub type EnvMap = std::collections::HashMap<String, String>;
