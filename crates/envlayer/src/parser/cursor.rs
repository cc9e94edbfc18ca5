//! Position-tracking cursor over dotenv source text.

/// Location of a character in the source.
///
/// `line` and `column` are 1-based and count Unicode scalar values;
/// `offset` is the 0-based scalar index from the start of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// The position `n` scalars further along the same line.
    pub fn advanced(self, n: usize) -> Position {
        Position {
            line: self.line,
            column: self.column + n,
            offset: self.offset + n,
        }
    }
}

/// Immutable view of the remaining input plus its current position.
///
/// Advancing consumes one scalar value; a `\n` moves to the next line.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    rest: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            pos: Position::START,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Character `n` scalars ahead of the current one (`peek_nth(0) == peek()`).
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest.starts_with(prefix)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        self.pos.offset += 1;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds and return the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.rest;
        let mut len = 0;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
            len += c.len_utf8();
        }
        &start[..len]
    }
}
