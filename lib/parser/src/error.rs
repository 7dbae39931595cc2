use crate::span::{LineCol, SourceSpan};
use std::fmt::{Display, Formatter};

/// A syntax error in a SPARQL query or update.
///
/// The error points to the byte offset of the offending token and carries its resolved
/// line and column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct SyntaxError {
    span: SourceSpan,
    location: LineCol,
    message: String,
}

impl SyntaxError {
    pub(crate) fn new(source: &str, span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            span,
            location: LineCol::resolve(source, span.start),
            message: message.into(),
        }
    }

    /// The byte offset at which the error was detected.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// The span of the offending token.
    pub fn span(&self) -> SourceSpan {
        self.span
    }

    /// The 1-based line of the offending token.
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// The 1-based column of the offending token.
    pub fn column(&self) -> usize {
        self.location.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Syntax error at {} (offset {}): {}",
            self.location, self.span.start, self.message
        )
    }
}
