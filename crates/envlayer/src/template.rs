//! Interpolation templates: construction and resolution.
//!
//! Responsibilities:
//! - Accumulate literal text and variable references into a `Value`,
//!   coalescing adjacent literals (`ChunkBuilder`).
//! - Resolve a `Value` against a caller-supplied lookup (`resolve`).
//!
//! Does NOT handle:
//! - Deciding which maps a lookup consults (see `merge`).
//!
//! Invariants:
//! - `ChunkBuilder::finish` yields `Value::Literal` when no reference was pushed.
//! - Built templates never contain empty or adjacent literal chunks.
//! - `resolve` is pure: undefined references expand to `""` and never fail.

use crate::types::{Chunk, Value};

/// Incremental builder for a parsed value.
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    chunks: Vec<Chunk>,
    pending: String,
    has_refs: bool,
}

impl ChunkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.pending.push(c);
    }

    pub fn push_var(&mut self, name: impl Into<String>) {
        self.flush();
        self.chunks.push(Chunk::VarRef(name.into()));
        self.has_refs = true;
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.chunks
                .push(Chunk::Literal(std::mem::take(&mut self.pending)));
        }
    }

    pub fn finish(mut self) -> Value {
        if !self.has_refs {
            return Value::Literal(self.pending);
        }
        self.flush();
        Value::Template(self.chunks)
    }
}

/// Resolve `value` to its final text.
///
/// `lookup` is consulted once per reference; a `None` expands to the empty
/// string, mirroring shell semantics.
pub fn resolve<F>(value: &Value, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::Literal(text) => text.clone(),
        Value::Template(chunks) => {
            let mut out = String::new();
            for chunk in chunks {
                match chunk {
                    Chunk::Literal(text) => out.push_str(text),
                    Chunk::VarRef(name) => {
                        if let Some(resolved) = lookup(name) {
                            out.push_str(&resolved);
                        }
                    }
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder_without_refs_collapses_to_literal() {
        let mut builder = ChunkBuilder::new();
        builder.push_str("hello");
        builder.push_char(' ');
        builder.push_str("world");

        assert_eq!(builder.finish(), Value::literal("hello world"));
    }

    #[test]
    fn test_builder_coalesces_adjacent_literals() {
        let mut builder = ChunkBuilder::new();
        builder.push_str("a");
        builder.push_str("");
        builder.push_char('b');
        builder.push_var("X");
        builder.push_var("Y");
        builder.push_str("c");

        assert_eq!(
            builder.finish(),
            Value::Template(vec![
                Chunk::Literal("ab".to_string()),
                Chunk::VarRef("X".to_string()),
                Chunk::VarRef("Y".to_string()),
                Chunk::Literal("c".to_string()),
            ])
        );
    }

    #[test]
    fn test_single_reference_is_still_a_template() {
        let mut builder = ChunkBuilder::new();
        builder.push_var("");
        assert_eq!(
            builder.finish(),
            Value::Template(vec![Chunk::VarRef(String::new())])
        );
    }

    #[test]
    fn test_resolve_concatenates_chunks() {
        let vars: HashMap<&str, &str> = [("WHO", "world")].into_iter().collect();
        let value = Value::Template(vec![
            Chunk::Literal("hello ".to_string()),
            Chunk::VarRef("WHO".to_string()),
            Chunk::Literal("!".to_string()),
        ]);

        let out = resolve(&value, |name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(out, "hello world!");
    }

    #[test]
    fn test_resolve_undefined_reference_is_empty() {
        let value = Value::Template(vec![
            Chunk::Literal("[".to_string()),
            Chunk::VarRef("MISSING".to_string()),
            Chunk::Literal("]".to_string()),
        ]);

        assert_eq!(resolve(&value, |_| None), "[]");
    }

    #[test]
    fn test_resolve_literal_ignores_lookup() {
        let value = Value::literal("$NOT_A_REF");
        let out = resolve(&value, |_| panic!("literal values never look anything up"));
        assert_eq!(out, "$NOT_A_REF");
    }

    #[test]
    fn test_same_template_resolves_against_different_lookups() {
        let value = Value::Template(vec![Chunk::VarRef("V".to_string())]);
        assert_eq!(resolve(&value, |_| Some("one".to_string())), "one");
        assert_eq!(resolve(&value, |_| Some("two".to_string())), "two");
    }
}
