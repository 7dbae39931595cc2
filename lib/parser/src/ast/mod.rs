//! The concrete parse tree.
//!
//! The tree mirrors the grammar productions closely. Prefixed names and relative IRIs are kept
//! as written, together with the source spans needed for error reporting.

mod expr;
mod path;
mod pattern;
mod query;
mod term;
mod update;

pub use expr::*;
pub use path::*;
pub use pattern::*;
pub use query::*;
pub use term::*;
pub use update::*;
