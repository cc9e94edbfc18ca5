//! Recursive-descent dotenv grammar.
//!
//! Responsibilities:
//! - Turn the token stream into ordered `Entry`s.
//! - Apply quoting, escaping, trimming and comment rules per value form.
//! - Recognize `$NAME` / `${NAME}` references in interpolating forms.
//!
//! Does NOT handle:
//! - Resolving references (see `template::resolve`).
//! - Recovering from errors: the first malformed construct aborts the parse.
//!
//! Invariants:
//! - Value forms are chosen by the first token after `=`: triple quotes,
//!   then single-line quotes, then raw.
//! - In raw values a `#` opens a comment only after whitespace; that
//!   whitespace and any trailing whitespace are dropped.
//! - Single-quoted forms never interpolate.
//! - `$` not followed by a name or `{` is a literal dollar; `$$X` is `$`
//!   followed by a reference to `X`.

use super::cursor::Position;
use super::error::ParseError;
use super::lexer::{Token, TokenKind, tokenize};
use crate::template::ChunkBuilder;
use crate::types::{Entry, Value};

/// Parse dotenv `text` into entries, in definition order.
///
/// On failure the returned error carries `text` for rendering.
pub fn parse(text: &str) -> Result<Vec<Entry>, ParseError> {
    parse_tokens(text).map_err(|err| err.with_source(text))
}

fn parse_tokens(text: &str) -> Result<Vec<Entry>, ParseError> {
    let tokens = tokenize(text);
    Parser::new(&tokens).entries()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &'t Token<'a> {
        // The stream ends with Eof and the parser never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, ahead: usize) -> TokenKind {
        self.tokens
            .get(self.pos + ahead)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn bump(&mut self) -> &'t Token<'a> {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.tokens[self.pos - 1].kind == TokenKind::Newline
    }

    /// Skip one whitespace token, if present. Returns whether one was skipped.
    fn skip_whitespace(&mut self) -> bool {
        if self.at(TokenKind::Whitespace) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume tokens up to, not including, the next newline or end of input.
    fn skip_to_line_end(&mut self) {
        while !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            self.bump();
        }
    }

    fn error(at: Position, message: impl Into<String>) -> ParseError {
        ParseError::new(at, message)
    }

    fn entries(&mut self) -> Result<Vec<Entry>, ParseError> {
        let mut entries = Vec::new();
        loop {
            self.skip_blank_lines();
            if self.at(TokenKind::Eof) {
                return Ok(entries);
            }
            entries.push(self.entry()?);
        }
    }

    fn skip_blank_lines(&mut self) {
        loop {
            let start = self.pos;
            self.skip_whitespace();
            match self.peek().kind {
                TokenKind::Newline => {
                    self.bump();
                }
                TokenKind::Hash => {
                    self.skip_to_line_end();
                    self.bump();
                }
                TokenKind::Eof => return,
                _ => {
                    self.pos = start;
                    return;
                }
            }
        }
    }

    fn entry(&mut self) -> Result<Entry, ParseError> {
        self.skip_whitespace();
        self.skip_export();

        let key = self.peek();
        if key.kind != TokenKind::KeyChars {
            return Err(Self::error(key.pos, "expected variable name"));
        }
        self.bump();

        self.skip_whitespace();
        let eq = self.peek();
        if eq.kind != TokenKind::Equals {
            return Err(Self::error(eq.pos, "expected '=' after variable name"));
        }
        self.bump();
        let spaced = self.skip_whitespace();

        let value = match self.peek().kind {
            TokenKind::TripleDoubleQuote => self.multiline(Quote::Double)?,
            TokenKind::TripleSingleQuote => self.multiline(Quote::Single)?,
            TokenKind::DoubleQuote => self.double_quoted()?,
            TokenKind::SingleQuote => self.single_quoted()?,
            _ => self.raw(spaced)?,
        };
        self.end_of_line()?;

        Ok(Entry::new(key.text, value))
    }

    /// `export` is a prefix only when another name follows after whitespace.
    fn skip_export(&mut self) {
        let tok = self.peek();
        if tok.kind == TokenKind::KeyChars
            && tok.text == "export"
            && self.peek_kind_at(1) == TokenKind::Whitespace
            && self.peek_kind_at(2) == TokenKind::KeyChars
        {
            self.bump();
            self.bump();
        }
    }

    /// After a value: optional whitespace, optional comment, then line end.
    fn end_of_line(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.at(TokenKind::Hash) {
            self.skip_to_line_end();
        }
        let tok = self.peek();
        match tok.kind {
            TokenKind::Newline => {
                self.bump();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(Self::error(tok.pos, "unexpected token")),
        }
    }

    fn raw(&mut self, spaced: bool) -> Result<Value, ParseError> {
        let mut value = ChunkBuilder::new();
        // Whitespace seen but not yet known to be inside the value.
        let mut pending_space: Option<&str> = spaced.then_some("");

        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Newline | TokenKind::Eof => break,
                TokenKind::Whitespace => {
                    pending_space = Some(tok.text);
                    self.bump();
                }
                TokenKind::Hash if pending_space.is_some() => {
                    self.skip_to_line_end();
                    break;
                }
                kind => {
                    if let Some(space) = pending_space.take() {
                        value.push_str(space);
                    }
                    if kind == TokenKind::Dollar {
                        self.interpolation(&mut value)?;
                    } else {
                        value.push_str(tok.text);
                        self.bump();
                    }
                }
            }
        }

        Ok(value.finish())
    }

    fn double_quoted(&mut self) -> Result<Value, ParseError> {
        self.bump();
        let mut value = ChunkBuilder::new();

        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::DoubleQuote => {
                    self.bump();
                    return Ok(value.finish());
                }
                TokenKind::Escaped(c) => {
                    value.push_char(unescape(c));
                    self.bump();
                }
                TokenKind::Dollar => self.interpolation(&mut value)?,
                TokenKind::Newline => {
                    return Err(Self::error(
                        tok.pos,
                        "unexpected newline in double-quoted value",
                    ));
                }
                TokenKind::Eof => {
                    return Err(Self::error(tok.pos, "unterminated double-quoted value"));
                }
                TokenKind::TripleDoubleQuote => {
                    // Closing quote directly followed by `""`.
                    return Err(Self::error(tok.pos.advanced(1), "unexpected token"));
                }
                _ => {
                    value.push_str(tok.text);
                    self.bump();
                }
            }
        }
    }

    fn single_quoted(&mut self) -> Result<Value, ParseError> {
        self.bump();
        let mut value = String::new();

        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::SingleQuote => {
                    self.bump();
                    return Ok(Value::Literal(value));
                }
                TokenKind::Escaped('\'') => {
                    value.push('\'');
                    self.bump();
                }
                TokenKind::Newline => {
                    return Err(Self::error(
                        tok.pos,
                        "unexpected newline in single-quoted value",
                    ));
                }
                TokenKind::Eof => {
                    return Err(Self::error(tok.pos, "unterminated single-quoted value"));
                }
                TokenKind::TripleSingleQuote => {
                    return Err(Self::error(tok.pos.advanced(1), "unexpected token"));
                }
                _ => {
                    value.push_str(tok.text);
                    self.bump();
                }
            }
        }
    }

    /// Triple-quoted value. The opening delimiter ends its line and the
    /// closing one starts its own; the newlines adjacent to both are dropped.
    /// The closing delimiter may be followed by the usual end-of-line tail.
    fn multiline(&mut self, quote: Quote) -> Result<Value, ParseError> {
        let closing = match quote {
            Quote::Double => TokenKind::TripleDoubleQuote,
            Quote::Single => TokenKind::TripleSingleQuote,
        };
        self.bump();
        let after_open = self.peek();
        match after_open.kind {
            TokenKind::Newline => {
                self.bump();
            }
            TokenKind::Eof => {
                return Err(Self::error(after_open.pos, "unterminated multiline string"));
            }
            _ => {
                return Err(Self::error(
                    after_open.pos,
                    "unexpected character after multiline string start",
                ));
            }
        }

        let mut value = ChunkBuilder::new();
        let mut pending_newline = false;

        loop {
            let tok = self.peek();
            if tok.kind == closing && self.at_line_start() {
                self.bump();
                return Ok(value.finish());
            }
            match tok.kind {
                TokenKind::Eof => {
                    return Err(Self::error(tok.pos, "unterminated multiline string"));
                }
                TokenKind::Newline => {
                    if pending_newline {
                        value.push_char('\n');
                    }
                    pending_newline = true;
                    self.bump();
                    continue;
                }
                _ => {}
            }

            if std::mem::take(&mut pending_newline) {
                value.push_char('\n');
            }
            match (quote, tok.kind) {
                (Quote::Double, TokenKind::Escaped(c)) => {
                    value.push_char(unescape(c));
                    self.bump();
                }
                (Quote::Double, TokenKind::Dollar) => self.interpolation(&mut value)?,
                (Quote::Single, TokenKind::Escaped(c @ ('\'' | '\\'))) => {
                    value.push_char(c);
                    self.bump();
                }
                _ => {
                    value.push_str(tok.text);
                    self.bump();
                }
            }
        }
    }

    /// Handle a `$` token inside an interpolating value.
    fn interpolation(&mut self, value: &mut ChunkBuilder) -> Result<(), ParseError> {
        self.bump();
        let tok = self.peek();
        match tok.kind {
            TokenKind::VarName => {
                value.push_var(tok.text);
                self.bump();
                Ok(())
            }
            TokenKind::OpenBrace => {
                self.bump();
                let name = if self.at(TokenKind::VarName) {
                    self.bump().text
                } else {
                    ""
                };
                let close = self.peek();
                match close.kind {
                    TokenKind::CloseBrace => {
                        self.bump();
                        value.push_var(name);
                        Ok(())
                    }
                    TokenKind::Whitespace => Err(Self::error(
                        close.pos,
                        "unexpected whitespace in variable braces",
                    )),
                    TokenKind::Newline => Err(Self::error(
                        close.pos,
                        "unexpected newline in variable braces",
                    )),
                    TokenKind::Eof => {
                        Err(Self::error(close.pos, "unterminated variable braces"))
                    }
                    _ => Err(Self::error(
                        close.pos,
                        "unexpected character in variable braces",
                    )),
                }
            }
            _ => {
                value.push_char('$');
                Ok(())
            }
        }
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\u{0C}',
        'b' => '\u{08}',
        other => other,
    }
}
