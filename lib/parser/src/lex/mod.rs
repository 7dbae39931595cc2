//! SPARQL lexical analysis.
//!
//! The lexer turns the source into [Token]s with byte spans. Comments and whitespace are
//! dropped. String escapes and escapes in IRIs and local names are resolved here, so the
//! parser only sees unescaped values.

mod chars;
mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Token, TokenKind};
