//! Types shared between the storage layer and the query engine.

pub mod error;
mod quad_storage;

pub use quad_storage::{QuadIter, QuadPatternEvaluator, QuadStorage};
