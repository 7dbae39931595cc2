//! [SPARQL](https://www.w3.org/TR/sparql11-overview/) preparation and evaluation.

mod bindings;
mod dataset;
pub mod error;
mod eval;
mod evaluator;
mod hooks;

pub use bindings::Bindings;
pub use dataset::ActiveGraph;
pub use eval::evaluate_query;
pub use evaluator::{ExpressionError, SimpleEvaluator, SolutionIter};
pub use hooks::{
    register_evaluation_hook, unregister_evaluation_hook, EvaluationHook, EvaluationHookGuard,
};

use crate::sparql::error::QueryPreparationError;
use rdf_loom_logical::{translate_query, translate_update, Namespaces, Query, QueryRewriter, Update};
use rdf_loom_model::{NamedNode, Term};
use rdf_loom_parser::{parse_query, parse_update};
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A function that can be called from a query by its IRI.
///
/// Returning [None] signals an error, which is handled like a type error of a builtin.
pub type CustomFunction = Arc<dyn Fn(&[Term]) -> Option<Term> + Send + Sync>;

/// Options for the evaluation of a query.
#[derive(Clone, Default)]
pub struct QueryOptions {
    rewriters: Vec<Arc<dyn QueryRewriter>>,
    custom_functions: FxHashMap<NamedNode, CustomFunction>,
    default_graph_as_union: bool,
}

impl QueryOptions {
    /// Adds a rewriter. Rewriters are applied in the order in which they were added.
    #[must_use]
    pub fn with_rewriter(mut self, rewriter: impl QueryRewriter + 'static) -> Self {
        self.rewriters.push(Arc::new(rewriter));
        self
    }

    /// Adds a custom function. Calls to `name` that are not builtins are sent to `function`.
    #[must_use]
    pub fn with_custom_function(
        mut self,
        name: NamedNode,
        function: impl Fn(&[Term]) -> Option<Term> + Send + Sync + 'static,
    ) -> Self {
        self.custom_functions.insert(name, Arc::new(function));
        self
    }

    /// Uses the union of all graphs of the store as the default graph of queries without a
    /// `FROM` clause.
    #[must_use]
    pub fn with_default_graph_as_union(mut self) -> Self {
        self.default_graph_as_union = true;
        self
    }

    pub fn rewriters(&self) -> &[Arc<dyn QueryRewriter>] {
        &self.rewriters
    }

    pub fn custom_functions(&self) -> &FxHashMap<NamedNode, CustomFunction> {
        &self.custom_functions
    }

    pub fn default_graph_as_union(&self) -> bool {
        self.default_graph_as_union
    }
}

impl Debug for QueryOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryOptions")
            .field(
                "rewriters",
                &self.rewriters.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field(
                "custom_functions",
                &self.custom_functions.keys().collect::<Vec<_>>(),
            )
            .field("default_graph_as_union", &self.default_graph_as_union)
            .finish()
    }
}

/// Parses and translates a query.
///
/// `namespaces` are the prefixes that are declared before the prologue of the query. `base_iri`
/// is used if the query does not declare a `BASE`.
pub fn prepare_query(
    query: &str,
    namespaces: &Namespaces,
    base_iri: Option<&str>,
) -> Result<Query, QueryPreparationError> {
    let ast = parse_query(query)?;
    Ok(translate_query(&ast, query, namespaces, base_iri)?)
}

/// Parses and translates an update request.
pub fn prepare_update(
    update: &str,
    namespaces: &Namespaces,
    base_iri: Option<&str>,
) -> Result<Update, QueryPreparationError> {
    let ast = parse_update(update)?;
    Ok(translate_update(&ast, update, namespaces, base_iri)?)
}
