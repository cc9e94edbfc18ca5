//! Dotenv file format parser.
//!
//! Responsibilities:
//! - Tokenize dotenv text with line/column tracking (`lexer`).
//! - Parse tokens into ordered entries whose values are literals or
//!   interpolation templates (`grammar`).
//! - Expose the `DotenvParser` seam so loaders can swap in another parser.
//!
//! Does NOT handle:
//! - Reading files from disk (see `merge`).
//! - Resolving interpolation (see `template`).
//!
//! Invariants:
//! - Parsing is fail-fast: the first malformed construct yields a `ParseError`.

mod cursor;
mod error;
mod grammar;
mod lexer;

#[cfg(test)]
mod tests;

pub use cursor::Position;
pub use error::ParseError;
pub use grammar::parse;
pub use lexer::{Token, TokenKind, is_key_char, tokenize};

use crate::types::Entry;

/// A dotenv text parser.
///
/// Implemented by `DefaultParser` and by any
/// `Fn(&str) -> Result<Vec<Entry>, ParseError>` closure.
pub trait DotenvParser {
    fn parse(&self, text: &str) -> Result<Vec<Entry>, ParseError>;
}

/// The built-in dotenv grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl DotenvParser for DefaultParser {
    fn parse(&self, text: &str) -> Result<Vec<Entry>, ParseError> {
        grammar::parse(text)
    }
}

impl<F> DotenvParser for F
where
    F: Fn(&str) -> Result<Vec<Entry>, ParseError>,
{
    fn parse(&self, text: &str) -> Result<Vec<Entry>, ParseError> {
        self(text)
    }
}
