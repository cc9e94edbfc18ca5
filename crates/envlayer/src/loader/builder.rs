//! Dotenv loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `Loader` holding enabled tags, the parser,
//!   the base directory and the pre-insert hook.
//! - Run collection, merge and the final write to an `EnvStore`.
//!
//! Does NOT handle:
//! - Parsing or merge precedence (delegated to `parser` and `merge`).
//! - Computing built-in tags (see tags.rs).
//!
//! Invariants / Assumptions:
//! - The store is snapshotted once, before merging, and written once, after.
//! - A failed load writes nothing.
//! - The `ENVLAYER_DISABLED` gate is read from the target store, not the process.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::LoadError;
use super::tags::builtin_tags;
use crate::constants::DISABLED_ENV_VAR;
use crate::merge::merge;
use crate::parser::{DefaultParser, DotenvParser};
use crate::sources::collect;
use crate::store::EnvStore;
use crate::types::{EnvMap, SourceSpec, TagSet};

type PreInsertHook = Box<dyn Fn(String, String) -> (String, String)>;

/// Loads layered dotenv sources into an environment store.
pub struct Loader {
    tags: TagSet,
    parser: Box<dyn DotenvParser>,
    base_dir: Option<PathBuf>,
    pre_insert_hook: Option<PreInsertHook>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("tags", &self.tags)
            .field("base_dir", &self.base_dir)
            .field("pre_insert_hook", &self.pre_insert_hook.is_some())
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Create a loader with no tags, the default parser and no hook.
    pub fn new() -> Self {
        Self {
            tags: TagSet::new(),
            parser: Box::new(DefaultParser),
            base_dir: None,
            pre_insert_hook: None,
        }
    }

    /// Enable a single tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.enable(tag);
        self
    }

    /// Merge `tags` into the enabled set; later settings win.
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Enable the environment-name, CI and OS tags detected from `env`.
    pub fn with_builtin_tags(mut self, env_name: Option<&str>, env: &EnvMap) -> Self {
        self.tags.extend(builtin_tags(env_name, env));
        self
    }

    /// Replace the dotenv parser.
    pub fn with_parser(mut self, parser: impl DotenvParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Resolve relative source paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Transform every merged pair right before it is written.
    ///
    /// Pairs are passed in ascending order of their merged name. If the hook
    /// maps several pairs to one name, the last of them wins.
    pub fn with_pre_insert_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(String, String) -> (String, String) + 'static,
    {
        self.pre_insert_hook = Some(Box::new(hook));
        self
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Check if loading is disabled via the store's environment.
    fn disabled(store: &impl EnvStore) -> bool {
        store
            .get(DISABLED_ENV_VAR)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    }

    fn resolve_path(&self, path: PathBuf) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    /// Load `sources` into `store`.
    ///
    /// Returns the delta that was written: every variable the sources newly
    /// set or overwrote, after the pre-insert hook.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A source file exists but cannot be read (`LoadError::Read`)
    /// - A source file has invalid syntax (`LoadError::Parse`)
    ///
    /// Missing files are silently skipped. On error the store is untouched.
    pub fn load(&self, sources: &SourceSpec, store: &mut impl EnvStore) -> Result<EnvMap, LoadError> {
        if Self::disabled(store) {
            tracing::info!(gate = DISABLED_ENV_VAR, "Dotenv loading disabled");
            return Ok(EnvMap::new());
        }

        let collected = collect(sources, &self.tags);
        let regular: Vec<PathBuf> = collected
            .regular
            .into_iter()
            .map(|p| self.resolve_path(p))
            .collect();
        let overwrite: Vec<PathBuf> = collected
            .overwrite
            .into_iter()
            .map(|p| self.resolve_path(p))
            .collect();
        tracing::debug!(
            regular = regular.len(),
            overwrite = overwrite.len(),
            tags = ?self.tags.enabled(),
            "Collected dotenv sources"
        );

        let system_env = store.snapshot();
        let mut delta = merge(&regular, &overwrite, &system_env, self.parser.as_ref())?;

        if let Some(hook) = &self.pre_insert_hook {
            delta = apply_hook(hook, delta);
        }

        store.apply(&delta);
        tracing::info!(variables = delta.len(), "Applied dotenv variables");
        Ok(delta)
    }
}

fn apply_hook(hook: &PreInsertHook, delta: EnvMap) -> EnvMap {
    let mut pairs: Vec<(String, String)> = delta.into_iter().collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut hooked = EnvMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        let (name, value) = hook(key, value);
        if hooked.contains_key(&name) {
            tracing::warn!(key = %name, "Pre-insert hook produced a duplicate name; keeping the later pair");
        }
        hooked.insert(name, value);
    }
    hooked
}
