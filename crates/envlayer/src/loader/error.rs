//! Error types for dotenv loading and typed reads.
//!
//! Responsibilities:
//! - Define error variants for loading failures (unreadable or malformed files).
//! - Define error variants for typed environment reads.
//!
//! Does NOT handle:
//! - Syntax error details (see `parser::ParseError`).
//! - Conversion failures themselves (see `cast::CastError`).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths).
//! - A missing file is never an error; it contributes no entries.
//! - Messages NEVER include raw dotenv contents or variable values.

use std::path::PathBuf;
use thiserror::Error;

use crate::cast::CastError;
use crate::parser::ParseError;

/// Errors that abort a `load` call.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read (permissions, not a file, not UTF-8).
    #[error("Failed to read dotenv file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has invalid syntax.
    #[error("Failed to parse dotenv file at {path}:{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// Source excerpt for a parse failure, when available.
    pub fn render(&self) -> Option<String> {
        match self {
            LoadError::Parse { path, source } => source.render(&path.display().to_string()),
            LoadError::Read { .. } => None,
        }
    }
}

/// Errors returned by typed environment reads.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Environment variable {name} is not defined")]
    Undefined { name: String },

    #[error("Invalid value for environment variable {name}: {source}")]
    Cast {
        name: String,
        #[source]
        source: CastError,
    },
}
