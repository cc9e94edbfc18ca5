//! Source tree collection.
//!
//! Responsibilities:
//! - Flatten a `SourceSpec` into the ordered "regular" and "overwrite" file
//!   lists, honouring enabled tags.
//!
//! Does NOT handle:
//! - Path resolution or file existence (see `loader` and `merge`).
//!
//! Invariants:
//! - Depth-first, left-to-right: files keep their declaration order within
//!   each group.
//! - Anything nested under `overwrite`, at any depth, lands in the overwrite
//!   group; nested `overwrite` tags never flip back to regular.
//! - A disabled or unknown tag drops its whole subtree, including any
//!   `overwrite` subtrees inside it.

use std::path::PathBuf;

use crate::constants::OVERWRITE_TAG;
use crate::types::{SourceSpec, TagSet};

/// Files selected from a source tree, split by precedence group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub regular: Vec<PathBuf>,
    pub overwrite: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Regular,
    Overwrite,
}

/// Walk `spec` and split its files into the regular and overwrite groups.
pub fn collect(spec: &SourceSpec, tags: &TagSet) -> Collected {
    let mut out = Collected::default();
    walk(spec, tags, Group::Regular, &mut out);
    out
}

fn walk(spec: &SourceSpec, tags: &TagSet, group: Group, out: &mut Collected) {
    match spec {
        SourceSpec::File(path) => match group {
            Group::Regular => out.regular.push(path.clone()),
            Group::Overwrite => out.overwrite.push(path.clone()),
        },
        SourceSpec::List(items) => {
            for item in items {
                walk(item, tags, group, out);
            }
        }
        SourceSpec::Tagged { tag, inner } if tag == OVERWRITE_TAG => {
            walk(inner, tags, Group::Overwrite, out);
        }
        SourceSpec::Tagged { tag, inner } => {
            if tags.is_enabled(tag) {
                walk(inner, tags, group, out);
            } else {
                tracing::debug!(tag = %tag, "Skipping sources under disabled tag");
            }
        }
    }
}
