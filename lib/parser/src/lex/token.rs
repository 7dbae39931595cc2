//! SPARQL token types.

use crate::span::SourceSpan;
use std::fmt::{Display, Formatter};

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

/// Token kinds for SPARQL.
///
/// Keywords and built-in function names are not distinguished by the lexer. They are lexed as
/// [TokenKind::Word] and matched case-insensitively by the parser. This avoids ambiguities
/// between keywords and prefixed names such as `select:x`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Full IRI `<http://example.org/>`, stored without the angle brackets and unescaped.
    IriRef(String),
    /// Prefixed name `prefix:local`. Both parts may be empty (`:`). Local escapes are resolved.
    PrefixedName { prefix: String, local: String },
    /// Variable `?name` or `$name`, stored without the sigil.
    Var(String),
    /// String literal with escapes resolved.
    String(String),
    /// Integer literal lexical form, without sign.
    Integer(String),
    /// Decimal literal lexical form, without sign.
    Decimal(String),
    /// Double literal lexical form, without sign.
    Double(String),
    /// Language tag, stored without the `@`.
    LangTag(String),
    /// Labeled blank node `_:name`, stored without the `_:`.
    BlankNodeLabel(String),
    /// A bare word. Keywords, `a`, `true`, `false`, and built-in function names.
    Word(String),

    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Comma,
    Semicolon,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Bang,
    AndAnd,
    OrOr,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    DoubleCaret,
    Pipe,
    Question,

    Eof,
}

impl TokenKind {
    /// Returns whether this token is the given keyword, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, TokenKind::Word(word) if word.eq_ignore_ascii_case(keyword))
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::IriRef(iri) => write!(f, "<{iri}>"),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{prefix}:{local}"),
            TokenKind::Var(name) => write!(f, "?{name}"),
            TokenKind::String(value) => write!(f, "\"{value}\""),
            TokenKind::Integer(value) | TokenKind::Decimal(value) | TokenKind::Double(value) => {
                write!(f, "{value}")
            }
            TokenKind::LangTag(tag) => write!(f, "@{tag}"),
            TokenKind::BlankNodeLabel(label) => write!(f, "_:{label}"),
            TokenKind::Word(word) => write!(f, "{word}"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::GtEq => write!(f, ">="),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::AndAnd => write!(f, "&&"),
            TokenKind::OrOr => write!(f, "||"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::DoubleCaret => write!(f, "^^"),
            TokenKind::Pipe => write!(f, "|"),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
