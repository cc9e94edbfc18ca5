//! Parsed dotenv entries and their values.
//!
//! Responsibilities:
//! - Define `Entry`, the `(key, value)` pair produced by the parser.
//! - Define `Value`, either a plain literal or an interpolation template.
//! - Define `Chunk`, the building block of templates.
//!
//! Does NOT handle:
//! - Building templates from parser output (see `template::ChunkBuilder`).
//! - Resolving templates against a lookup (see `template::resolve`).
//!
//! Invariants:
//! - A `Value::Template` always holds at least one `Chunk::VarRef`.
//! - Template chunk lists never contain two adjacent `Chunk::Literal`s nor an
//!   empty `Chunk::Literal`. Only `ChunkBuilder` constructs templates inside
//!   the crate, and it upholds both rules.

use serde::{Deserialize, Serialize};

/// A single `KEY=VALUE` definition, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Value of a dotenv entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Fully known text; no interpolation was present.
    Literal(String),
    /// Ordered literal and variable-reference chunks, resolved at merge time.
    Template(Vec<Chunk>),
}

impl Value {
    pub fn literal(text: impl Into<String>) -> Self {
        Value::Literal(text.into())
    }

    /// Returns true if resolving this value requires a variable lookup.
    pub fn is_template(&self) -> bool {
        matches!(self, Value::Template(_))
    }

    /// Names referenced by this value, in order of appearance.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let chunks: &[Chunk] = match self {
            Value::Literal(_) => &[],
            Value::Template(chunks) => chunks,
        };
        chunks.iter().filter_map(|chunk| match chunk {
            Chunk::VarRef(name) => Some(name.as_str()),
            Chunk::Literal(_) => None,
        })
    }
}

/// Piece of an interpolation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chunk {
    Literal(String),
    /// Reference to another variable. The name is empty for `${}`.
    VarRef(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_lists_names_in_order() {
        let value = Value::Template(vec![
            Chunk::VarRef("A".to_string()),
            Chunk::Literal("-".to_string()),
            Chunk::VarRef("B".to_string()),
            Chunk::VarRef(String::new()),
        ]);

        let names: Vec<&str> = value.references().collect();
        assert_eq!(names, vec!["A", "B", ""]);
        assert!(value.is_template());
    }

    #[test]
    fn test_literal_has_no_references() {
        let value = Value::literal("plain");
        assert_eq!(value.references().count(), 0);
        assert!(!value.is_template());
    }

    #[test]
    fn test_template_serializes_as_plain_data() {
        let value = Value::Template(vec![
            Chunk::Literal("hello ".to_string()),
            Chunk::VarRef("WHO".to_string()),
        ]);

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "template": [{ "literal": "hello " }, { "var_ref": "WHO" }] })
        );

        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }
}
