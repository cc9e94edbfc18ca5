//! Tests for the dotenv grammar.
//!
//! Responsibilities:
//! - Test every value form (raw, quoted, multiline) and its trimming rules.
//! - Test interpolation recognition and the template shapes it produces.
//! - Test error messages and positions for malformed input.

use crate::types::{Chunk, Entry, Value};


/// Parse `text`, asserting it holds exactly one entry.
pub fn parse_one(text: &str) -> Entry {
    let mut entries = super::parse(text).unwrap_or_else(|e| panic!("{text:?} failed: {e}"));
    assert_eq!(entries.len(), 1, "expected one entry in {text:?}");
    entries.remove(0)
}

/// Value of the single entry in `text`.
pub fn value_of(text: &str) -> Value {
    parse_one(text).value
}

pub fn lit(text: &str) -> Value {
    Value::literal(text)
}

pub fn var(name: &str) -> Chunk {
    Chunk::VarRef(name.to_string())
}

pub fn text(s: &str) -> Chunk {
    Chunk::Literal(s.to_string())
}
