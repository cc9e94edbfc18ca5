//! Error type for dotenv lexing and parsing.
//!
//! Responsibilities:
//! - Carry the 1-based line/column of the first malformed construct.
//! - Render an optional source excerpt for diagnostics.
//!
//! Does NOT handle:
//! - File-level context such as the path (see `loader::LoadError`).
//!
//! Invariants:
//! - `Display` NEVER includes source text, since dotenv values are often secrets.
//!   Source excerpts are only produced by the opt-in `render`.

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use super::cursor::Position;

/// Malformed dotenv syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    /// Scalar offset of the failure point, used for rendering.
    pub offset: usize,
    pub message: String,
    source_text: Option<String>,
}

impl ParseError {
    pub fn new(at: Position, message: impl Into<String>) -> Self {
        Self {
            line: at.line,
            column: at.column,
            offset: at.offset,
            message: message.into(),
            source_text: None,
        }
    }

    /// Attach the text that failed to parse so it can be rendered later.
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// Render a source excerpt pointing at the failure, labelled with `name`.
    ///
    /// Returns `None` when no source text was attached.
    pub fn render(&self, name: &str) -> Option<String> {
        let text = self.source_text.as_deref()?;
        let len = text.chars().count();
        let start = self.offset.min(len.saturating_sub(1));
        let span = start..(start + 1).min(len);
        let id = name.to_string();

        let report = Report::build(ReportKind::Error, id.clone(), start)
            .with_config(Config::default().with_color(false))
            .with_message(format!(
                "invalid dotenv syntax at {}:{}",
                self.line, self.column
            ))
            .with_label(Label::new((id.clone(), span)).with_message(&self.message))
            .finish();

        let mut output = Vec::new();
        report
            .write((id, Source::from(text)), &mut output)
            .ok()?;
        String::from_utf8(output).ok()
    }
}
