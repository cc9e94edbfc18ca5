//! Two-phase merge of dotenv files into an environment delta.
//!
//! Responsibilities:
//! - Read and parse each file, treating missing files as empty.
//! - Fold regular entries without shadowing variables the system defines.
//! - Fold overwrite entries unconditionally, on top of the regular result.
//!
//! Does NOT handle:
//! - Choosing which files to load (see `sources::collect`).
//! - Writing the delta to the real environment (see `loader`).
//!
//! Invariants:
//! - Files are processed strictly in the given order; later entries see the
//!   values resolved before them.
//! - Interpolation happens at assignment time. A value that captured an
//!   older definition keeps it even if the referenced key is redefined later.
//! - Regular entries for keys present in `system_env` are discarded.
//! - The returned delta holds only newly set or overwritten variables.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::loader::LoadError;
use crate::parser::DotenvParser;
use crate::template::resolve;
use crate::types::{EnvMap, Entry};

/// Merge `regular` then `overwrite` files against `system_env`.
pub fn merge<P>(
    regular: &[PathBuf],
    overwrite: &[PathBuf],
    system_env: &EnvMap,
    parser: &P,
) -> Result<EnvMap, LoadError>
where
    P: DotenvParser + ?Sized,
{
    let entries = load_entries(regular, parser)?;
    let to_add = fold_regular(entries, system_env);

    let entries = load_entries(overwrite, parser)?;
    let to_add_overwrite = fold_overwrite(entries, &to_add, system_env);

    let mut delta = to_add;
    delta.extend(to_add_overwrite);
    Ok(delta)
}

/// Parse every file in order and flatten the entries.
pub fn load_entries<P>(paths: &[PathBuf], parser: &P) -> Result<Vec<Entry>, LoadError>
where
    P: DotenvParser + ?Sized,
{
    let mut entries = Vec::new();
    for path in paths {
        entries.extend(load_file(path, parser)?);
    }
    Ok(entries)
}

fn load_file<P>(path: &Path, parser: &P) -> Result<Vec<Entry>, LoadError>
where
    P: DotenvParser + ?Sized,
{
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Dotenv file not found, skipping");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let entries = parser.parse(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        entries = entries.len(),
        "Parsed dotenv file"
    );
    Ok(entries)
}

fn fold_regular(entries: Vec<Entry>, system_env: &EnvMap) -> EnvMap {
    let mut to_add = EnvMap::new();
    for Entry { key, value } in entries {
        if system_env.contains_key(&key) {
            tracing::debug!(key = %key, "Keeping system value over regular dotenv entry");
            continue;
        }
        let resolved = resolve(&value, |name| {
            to_add.get(name).or_else(|| system_env.get(name)).cloned()
        });
        to_add.insert(key, resolved);
    }
    to_add
}

fn fold_overwrite(entries: Vec<Entry>, to_add: &EnvMap, system_env: &EnvMap) -> EnvMap {
    let mut to_add_overwrite = EnvMap::new();
    for Entry { key, value } in entries {
        // `to_add` and `system_env` never share keys, so chaining them is
        // the system environment with the regular delta applied.
        let resolved = resolve(&value, |name| {
            to_add_overwrite
                .get(name)
                .or_else(|| to_add.get(name))
                .or_else(|| system_env.get(name))
                .cloned()
        });
        to_add_overwrite.insert(key, resolved);
    }
    to_add_overwrite
}
