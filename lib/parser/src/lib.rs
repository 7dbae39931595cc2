//! A SPARQL 1.1 parser.
//!
//! [parse_query] and [parse_update] turn source text into a concrete parse tree ([ast]). The
//! tree keeps prefixed names and relative IRIs as written. Resolving them against a base IRI
//! and a prefix map is left to the algebra translation.

pub mod ast;
mod error;
mod lex;
mod parse;
mod span;

pub use error::SyntaxError;
pub use parse::{parse_query, parse_update};
pub use span::{LineCol, SourceSpan};
