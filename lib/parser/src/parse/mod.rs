//! The recursive-descent parser.
//!
//! Parsing stops at the first error. Each production returns a [SyntaxError] that points to the
//! offending token.

mod expr;
mod path;
mod pattern;
mod query;
mod term;
mod update;

use crate::ast::{QueryAst, UpdateAst};
use crate::error::SyntaxError;
use crate::lex::{tokenize, Token, TokenKind};
use crate::span::SourceSpan;

/// Nested groups, expressions, and paths deeper than this are rejected.
const MAX_NESTING_DEPTH: usize = 128;

type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a SPARQL 1.1 query.
///
/// # Example
///
/// ```
/// use rdf_loom_parser::parse_query;
///
/// let query = parse_query("SELECT ?s WHERE { ?s ?p ?o }").unwrap();
/// assert!(query.values.is_none());
/// ```
pub fn parse_query(source: &str) -> Result<QueryAst, SyntaxError> {
    tracing::debug!(length = source.len(), "Parsing SPARQL query");
    let mut parser = Parser::new(source)?;
    let query = parser.parse_query()?;
    parser.expect_eof()?;
    Ok(query)
}

/// Parses a SPARQL 1.1 update request.
pub fn parse_update(source: &str) -> Result<UpdateAst, SyntaxError> {
    tracing::debug!(length = source.len(), "Parsing SPARQL update");
    let mut parser = Parser::new(source)?;
    let update = parser.parse_update()?;
    parser.expect_eof()?;
    Ok(update)
}

/// Holds the token stream and the current position.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    eof: Token,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> ParseResult<Self> {
        let tokens = tokenize(source)?;
        Ok(Self {
            source,
            tokens,
            eof: Token::new(TokenKind::Eof, SourceSpan::point(source.len())),
            pos: 0,
            depth: 0,
        })
    }

    fn peek_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek(&self) -> &TokenKind {
        &self.peek_token().kind
    }

    /// Peeks at the nth token ahead (0 = current).
    fn peek_nth(&self, n: usize) -> &TokenKind {
        &self.tokens.get(self.pos + n).unwrap_or(&self.eof).kind
    }

    fn current_span(&self) -> SourceSpan {
        self.peek_token().span
    }

    /// The span of the previous token. Used to close the span of a production.
    fn previous_span(&self) -> SourceSpan {
        self.pos
            .checked_sub(1)
            .and_then(|pos| self.tokens.get(pos))
            .map_or(SourceSpan::point(0), |token| token.span)
    }

    fn span_from(&self, start: SourceSpan) -> SourceSpan {
        start.union(self.previous_span())
    }

    fn advance(&mut self) -> Token {
        let token = self.peek_token().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<SourceSpan> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("'{kind}'")))
        }
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<SourceSpan> {
        if self.check_keyword(keyword) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(keyword))
        }
    }

    fn expect_eof(&mut self) -> ParseResult<()> {
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn error_at(&self, span: SourceSpan, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.source, span, message)
    }

    /// Creates an "expected ..., found ..." error at the current token.
    fn unexpected(&self, expected: &str) -> SyntaxError {
        self.error_at(
            self.current_span(),
            format!("expected {expected}, found {}", self.peek()),
        )
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at(self.current_span(), "nesting is too deep"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
