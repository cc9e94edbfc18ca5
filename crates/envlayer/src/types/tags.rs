//! Enabled-tag set used to gate tagged sources.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::OVERWRITE_TAG;

/// Mapping from tag name to its enabled flag.
///
/// Unknown tags read as disabled. The reserved `overwrite` tag is structural
/// and is never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TagFlags")]
pub struct TagSet {
    flags: HashMap<String, bool>,
}

/// Serialized form of `TagSet`; deserialization goes through `TagSet::set`.
#[derive(Deserialize)]
struct TagFlags {
    flags: HashMap<String, bool>,
}

impl From<TagFlags> for TagSet {
    fn from(raw: TagFlags) -> Self {
        let mut tags = TagSet::new();
        for (tag, enabled) in raw.flags {
            tags.set(tag, enabled);
        }
        tags
    }
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag for `tag`. Returns false (and stores nothing) for the
    /// reserved `overwrite` tag.
    pub fn set(&mut self, tag: impl Into<String>, enabled: bool) -> bool {
        let tag = tag.into();
        if tag == OVERWRITE_TAG {
            tracing::warn!(
                tag = %tag,
                "Ignoring reserved tag in enabled tags; overwrite sources are selected structurally"
            );
            return false;
        }
        self.flags.insert(tag, enabled);
        true
    }

    pub fn enable(&mut self, tag: impl Into<String>) -> bool {
        self.set(tag, true)
    }

    pub fn is_enabled(&self, tag: &str) -> bool {
        self.flags.get(tag).copied().unwrap_or(false)
    }

    /// Copy every flag of `other` into `self`, `other` winning on conflict.
    pub fn extend(&mut self, other: TagSet) {
        self.flags.extend(other.flags);
    }

    /// Enabled tag names, sorted for stable output.
    pub fn enabled(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for tag in iter {
            tags.enable(tag);
        }
        tags
    }
}
