//! Source positions.

use std::fmt::{Display, Formatter};

/// A span in the source text, identified by byte offsets.
///
/// Spans are inclusive of start and exclusive of end: `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// Byte offset of the start (inclusive)
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a single position.
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Create a span that covers both this span and another.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extract the substring covered by this span from the source. Out of range spans are
    /// clamped to the source length.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        let start = self.start.min(source.len());
        let end = self.end.min(source.len());
        source.get(start..end).unwrap_or("")
    }
}

/// A line/column position in source text (1-indexed).
///
/// Columns count characters, not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    /// Resolves the byte `offset` in `source`. Offsets past the end resolve to the end.
    pub fn resolve(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (i, c) in source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl Display for LineCol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_union_and_slice() {
        let span = SourceSpan::new(0, 6).union(SourceSpan::new(4, 9));
        assert_eq!(span, SourceSpan::new(0, 9));
        assert_eq!(span.slice("SELECT ?x"), "SELECT ?x");
        assert_eq!(SourceSpan::new(7, 100).slice("SELECT ?x"), "?x");
    }

    #[test]
    fn test_line_col() {
        let source = "SELECT *\nWHERE { é }";
        assert_eq!(LineCol::resolve(source, 0), LineCol { line: 1, column: 1 });
        assert_eq!(LineCol::resolve(source, 9), LineCol { line: 2, column: 1 });
        // 'é' takes two bytes but one column.
        let after = source.find('}').unwrap();
        assert_eq!(
            LineCol::resolve(source, after),
            LineCol {
                line: 2,
                column: 11
            }
        );
    }
}
