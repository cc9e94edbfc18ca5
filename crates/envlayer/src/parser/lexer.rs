//! Dotenv tokenizer.
//!
//! Responsibilities:
//! - Split raw file text into a flat token stream with source positions.
//! - Group `"""` and `'''` runs into single delimiter tokens.
//!
//! Does NOT handle:
//! - Context-dependent meaning (comment vs. literal `#`, escapes inside
//!   single quotes, brace validation, whether a triple quote opens a
//!   multiline value); the grammar decides those.
//!
//! Invariants:
//! - Scans left to right without backtracking; every scalar of the input
//!   belongs to exactly one token, so concatenating token texts yields the input.
//! - Runs of the same class (key chars, whitespace, raw chars) form one token.
//! - The stream always ends with a single `Eof` token.
//! - Tokenizing never fails; every error is reported by the grammar, so the
//!   first malformed construct in the file is the one reported.

use super::cursor::{Cursor, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of variable-name characters.
    KeyChars,
    /// Key-character run directly after a `$` or `${`.
    VarName,
    /// Run of characters with no special meaning.
    RawChars,
    /// Run of spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    /// `#`; whether it opens a comment depends on context.
    Hash,
    Equals,
    DoubleQuote,
    SingleQuote,
    /// `"""`.
    TripleDoubleQuote,
    /// `'''`.
    TripleSingleQuote,
    Dollar,
    OpenBrace,
    CloseBrace,
    /// Backslash plus the character it precedes.
    Escaped(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub pos: Position,
}

/// Whether `c` may appear in a variable name.
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || matches!(c, '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{FF}')
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_raw_char(c: char) -> bool {
    !is_key_char(c)
        && !is_inline_space(c)
        && !matches!(c, '\n' | '\r' | '#' | '=' | '"' | '\'' | '$' | '{' | '}' | '\\')
}

/// Tokenize `text`.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Lexer::new(text).run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            cursor: Cursor::new(text),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while let Some(c) = self.cursor.peek() {
            let start = self.cursor;
            let kind = match c {
                '\n' => {
                    self.cursor.bump();
                    TokenKind::Newline
                }
                '\r' if self.cursor.peek_nth(1) == Some('\n') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    TokenKind::Newline
                }
                '"' | '\'' => self.quote(c),
                '\\' => self.backslash(),
                '$' => {
                    self.cursor.bump();
                    TokenKind::Dollar
                }
                '{' => {
                    self.cursor.bump();
                    TokenKind::OpenBrace
                }
                '}' => {
                    self.cursor.bump();
                    TokenKind::CloseBrace
                }
                '#' => {
                    self.cursor.bump();
                    TokenKind::Hash
                }
                '=' => {
                    self.cursor.bump();
                    TokenKind::Equals
                }
                c if is_key_char(c) => {
                    self.cursor.eat_while(is_key_char);
                    if self.follows_dollar() {
                        TokenKind::VarName
                    } else {
                        TokenKind::KeyChars
                    }
                }
                c if is_inline_space(c) => {
                    self.cursor.eat_while(is_inline_space);
                    TokenKind::Whitespace
                }
                _ => {
                    // A lone `\r` is not a line break; it joins the raw run.
                    self.cursor.bump();
                    self.cursor.eat_while(is_raw_char);
                    TokenKind::RawChars
                }
            };
            self.push(start, kind);
        }

        let end = self.cursor;
        self.push(end, TokenKind::Eof);
        self.tokens
    }

    fn push(&mut self, start: Cursor<'a>, kind: TokenKind) {
        let consumed = start.rest().len() - self.cursor.rest().len();
        self.tokens.push(Token {
            kind,
            text: &start.rest()[..consumed],
            pos: start.position(),
        });
    }

    /// True if the previous token was `$`, or `{` directly after `$`.
    fn follows_dollar(&self) -> bool {
        match self.tokens.as_slice() {
            [.., last] if last.kind == TokenKind::Dollar => true,
            [.., before, last] => {
                last.kind == TokenKind::OpenBrace && before.kind == TokenKind::Dollar
            }
            _ => false,
        }
    }

    fn quote(&mut self, q: char) -> TokenKind {
        let triple = if q == '"' { "\"\"\"" } else { "'''" };
        if !self.cursor.starts_with(triple) {
            self.cursor.bump();
            return if q == '"' {
                TokenKind::DoubleQuote
            } else {
                TokenKind::SingleQuote
            };
        }

        for _ in 0..3 {
            self.cursor.bump();
        }
        if q == '"' {
            TokenKind::TripleDoubleQuote
        } else {
            TokenKind::TripleSingleQuote
        }
    }

    fn backslash(&mut self) -> TokenKind {
        self.cursor.bump();
        match self.cursor.peek() {
            Some(c) if c != '\n' && !(c == '\r' && self.cursor.peek_nth(1) == Some('\n')) => {
                self.cursor.bump();
                TokenKind::Escaped(c)
            }
            _ => TokenKind::RawChars,
        }
    }
}
