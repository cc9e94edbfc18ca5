//! Typed reads of environment variables.
//!
//! Responsibilities:
//! - Read a variable from an `EnvStore` and convert it with a `Caster`.
//! - Provide defaults, eager or lazily computed, for unset variables.
//!
//! Does NOT handle:
//! - Loading dotenv files; reads work whether or not `Loader::load` ran.
//!
//! Invariants:
//! - A lazy fallback runs only when the variable is unset.
//! - Fallback values are returned as given, without casting.
//! - A set-but-empty variable is cast, never replaced by the fallback.

use std::fmt;

use super::error::EnvError;
use crate::cast::{Caster, TypedValue, cast};
use crate::store::{EnvStore, ProcessEnv};

/// Value used when a variable is unset.
pub enum Fallback {
    Value(Option<TypedValue>),
    Lazy(Box<dyn FnOnce() -> Option<TypedValue>>),
}

impl Fallback {
    pub fn lazy<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<TypedValue> + 'static,
    {
        Fallback::Lazy(Box::new(f))
    }

    fn evaluate(self) -> Option<TypedValue> {
        match self {
            Fallback::Value(value) => value,
            Fallback::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

impl From<TypedValue> for Fallback {
    fn from(value: TypedValue) -> Self {
        Fallback::Value(Some(value))
    }
}

impl From<Option<TypedValue>> for Fallback {
    fn from(value: Option<TypedValue>) -> Self {
        Fallback::Value(value)
    }
}

/// Read `name` from `store` and cast it.
///
/// # Errors
///
/// - `EnvError::Undefined` if the variable is unset.
/// - `EnvError::Cast` if the caster rejects the value.
pub fn get_typed(
    store: &impl EnvStore,
    name: &str,
    caster: &Caster,
) -> Result<Option<TypedValue>, EnvError> {
    let raw = store.get(name).ok_or_else(|| EnvError::Undefined {
        name: name.to_string(),
    })?;
    cast_named(name, &raw, caster)
}

/// Like `get_typed`, but returns `default` when the variable is unset.
pub fn get_typed_or(
    store: &impl EnvStore,
    name: &str,
    caster: &Caster,
    default: impl Into<Fallback>,
) -> Result<Option<TypedValue>, EnvError> {
    match store.get(name) {
        Some(raw) => cast_named(name, &raw, caster),
        None => Ok(default.into().evaluate()),
    }
}

/// `get_typed` against the real process environment.
pub fn env(name: &str, caster: &Caster) -> Result<Option<TypedValue>, EnvError> {
    get_typed(&ProcessEnv, name, caster)
}

/// `get_typed_or` against the real process environment.
pub fn env_or(
    name: &str,
    caster: &Caster,
    default: impl Into<Fallback>,
) -> Result<Option<TypedValue>, EnvError> {
    get_typed_or(&ProcessEnv, name, caster, default)
}

fn cast_named(name: &str, raw: &str, caster: &Caster) -> Result<Option<TypedValue>, EnvError> {
    cast(raw, caster).map_err(|source| EnvError::Cast {
        name: name.to_string(),
        source,
    })
}
