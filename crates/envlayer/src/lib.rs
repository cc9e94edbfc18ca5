//! Layered dotenv loading for applications.
//!
//! This crate parses dotenv files, collects them from a tag-annotated source
//! tree, merges them against the existing environment with layered
//! precedence, and reads variables back through typed casters.
//!
//! ```no_run
//! use envlayer::{Loader, ProcessEnv, SourceSpec};
//!
//! let sources = SourceSpec::list([
//!     SourceSpec::file(".env"),
//!     SourceSpec::tagged("dev", ".env.dev"),
//!     SourceSpec::overwrite(".env.override"),
//! ]);
//! let delta = Loader::new().with_tag("dev").load(&sources, &mut ProcessEnv)?;
//! # Ok::<(), envlayer::LoadError>(())
//! ```

pub mod cast;
pub mod constants;
mod loader;
pub mod merge;
pub mod parser;
pub mod sources;
pub mod store;
pub mod template;
pub mod types;

pub use cast::{CastError, CastKind, Caster, Flavor, TypedValue, UnknownCaster, cast};
pub use loader::{
    EnvError, Fallback, LoadError, Loader, builtin_tags, env, env_or, get_typed, get_typed_or,
};
pub use merge::merge;
pub use parser::{DefaultParser, DotenvParser, ParseError, parse};
pub use sources::{Collected, collect};
pub use store::{EnvStore, MemoryEnv, ProcessEnv};
pub use template::resolve;
pub use types::{Chunk, Entry, EnvMap, SourceSpec, TagSet, Value};
