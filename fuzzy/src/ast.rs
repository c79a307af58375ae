//! Source location types
//!
//! `Span` tracks where a token came from in formula or rule text so that
//! syntax and resolution errors can point at the offending token.

use serde::Serialize;
use std::fmt;

/// Span representing a location in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }

    /// Shift a span found in a sub-slice so it points into the enclosing text.
    pub(crate) fn offset_by(self, base: Span) -> Self {
        let line = base.line + self.line - 1;
        let col = if self.line == 1 {
            base.col + self.col - 1
        } else {
            self.col
        };
        Self {
            start: base.start + self.start,
            end: base.start + self.end,
            line,
            col,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub(crate) fn merge(self, other: Span) -> Self {
        if other.start < self.start {
            Self {
                start: other.start,
                end: self.end.max(other.end),
                line: other.line,
                col: other.col,
            }
        } else {
            Self {
                end: self.end.max(other.end),
                ..self
            }
        }
    }
}

/// Resolves pest spans of one text to line and column in a forward pass.
///
/// Tokens arrive in source order, so each lookup scans only the text
/// between the previous token and the next one.
pub(crate) struct Locator<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'a> Locator<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    pub(crate) fn span(&mut self, span: pest::Span<'_>) -> Span {
        let start = span.start();
        if start < self.offset {
            *self = Self::new(self.text);
        }
        for c in self.text.get(self.offset..start).unwrap_or("").chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.offset = start;
        Span {
            start,
            end: span.end(),
            line: self.line,
            col: self.col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
