//! The logical layer of RDF Loom.
//!
//! This crate defines the SPARQL algebra ([algebra]) and translates the parse trees of
//! `rdf-loom-parser` into it. The result of a translation is an immutable [Query] or [Update].
//! [QueryRewriter]s can transform a [Query] before it is evaluated.
//!
//! # Example
//!
//! ```
//! use rdf_loom_logical::{translate_query, Namespaces, QueryForm};
//! use rdf_loom_parser::parse_query;
//!
//! let source = "PREFIX ex: <http://example.com/> SELECT ?s WHERE { ?s ex:p ?o }";
//! let ast = parse_query(source).unwrap();
//! let query = translate_query(&ast, source, &Namespaces::new(), None).unwrap();
//! assert!(matches!(query.form, QueryForm::Select { .. }));
//! assert_eq!(
//!     query.to_string(),
//!     "(project (?s) (bgp (triple ?s <http://example.com/p> ?o)))"
//! );
//! ```

pub mod algebra;
mod error;
mod query;
mod rewrite;
mod translate;
mod update;

pub use error::TranslationError;
pub use query::{Namespaces, NamespacesIter, Query, QueryDataset, QueryForm};
pub use rewrite::{apply_rewriters, QueryRewriter, ValuesFirstRewriter};
pub use translate::{translate_query, translate_update};
pub use update::{GraphTarget, GraphUpdateOperation, Update};
