//! Source specification tree.
//!
//! Responsibilities:
//! - Define `SourceSpec`, the recursive description of which dotenv files to
//!   load: a file, an ordered list, or a tagged subtree.
//! - Provide ergonomic constructors and conversions for building trees.
//!
//! Does NOT handle:
//! - Walking the tree or evaluating tags (see `sources::collect`).
//!
//! Invariants:
//! - Declaration order inside `List` is significant and never changed here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::OVERWRITE_TAG;

/// Recursive description of dotenv sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSpec {
    File(PathBuf),
    List(Vec<SourceSpec>),
    Tagged { tag: String, inner: Box<SourceSpec> },
}

impl SourceSpec {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceSpec::File(path.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceSpec>,
    {
        SourceSpec::List(items.into_iter().map(Into::into).collect())
    }

    /// Subtree included only when `tag` is enabled.
    pub fn tagged(tag: impl Into<String>, inner: impl Into<SourceSpec>) -> Self {
        SourceSpec::Tagged {
            tag: tag.into(),
            inner: Box::new(inner.into()),
        }
    }

    /// Subtree whose files always override existing variables.
    pub fn overwrite(inner: impl Into<SourceSpec>) -> Self {
        Self::tagged(OVERWRITE_TAG, inner)
    }
}

impl From<&str> for SourceSpec {
    fn from(path: &str) -> Self {
        SourceSpec::file(path)
    }
}

impl From<String> for SourceSpec {
    fn from(path: String) -> Self {
        SourceSpec::file(path)
    }
}

impl From<PathBuf> for SourceSpec {
    fn from(path: PathBuf) -> Self {
        SourceSpec::File(path)
    }
}

impl<S: Into<SourceSpec>> From<Vec<S>> for SourceSpec {
    fn from(items: Vec<S>) -> Self {
        SourceSpec::list(items)
    }
}
