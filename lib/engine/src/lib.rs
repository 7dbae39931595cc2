//! The SPARQL evaluator of RDF Loom.
//!
//! Queries are prepared once with [prepare_query](sparql::prepare_query) and can then be evaluated
//! any number of times with [evaluate_query](sparql::evaluate_query). Evaluation is lazy: the
//! solutions of a `SELECT` query are only computed while the [QuerySolutionStream] is consumed.
//!
//! ```
//! use rdf_loom_engine::sparql::{evaluate_query, prepare_query, Bindings, QueryOptions};
//! use rdf_loom_engine::QueryResults;
//! use rdf_loom_logical::Namespaces;
//! use rdf_loom_storage::memory::MemQuadStorage;
//! use std::sync::Arc;
//!
//! let query = prepare_query("ASK { }", &Namespaces::new(), None)?;
//! let storage = Arc::new(MemQuadStorage::new());
//! let results = evaluate_query(&query, storage, Bindings::new(), None, &QueryOptions::default())?;
//! assert!(matches!(results, QueryResults::Boolean(true)));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod results;
pub mod sparql;

pub use results::{QueryResults, QuerySolution, QuerySolutionStream};
