//! The SPARQL algebra.

mod expression;
mod path;
mod pattern;
mod term;

pub use expression::*;
pub use path::*;
pub use pattern::*;
pub use term::*;
