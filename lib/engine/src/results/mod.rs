mod query_solution;

use crate::sparql::error::QueryEvaluationError;
use rdf_loom_model::Graph;

pub use query_solution::QuerySolutionStream;
pub use sparesults::QuerySolution;

/// Results of a [SPARQL query](https://www.w3.org/TR/sparql11-query/).
pub enum QueryResults {
    /// Results of a [SELECT](https://www.w3.org/TR/sparql11-query/#select) query.
    Solutions(QuerySolutionStream),
    /// Result of a [ASK](https://www.w3.org/TR/sparql11-query/#ask) query.
    Boolean(bool),
    /// Results of a [CONSTRUCT](https://www.w3.org/TR/sparql11-query/#construct) or
    /// [DESCRIBE](https://www.w3.org/TR/sparql11-query/#describe) query.
    Graph(Graph),
}

impl QueryResults {
    /// The number of elements of the result.
    ///
    /// Solutions are materialized. The result of an `ASK` query has length 1.
    pub fn len(&mut self) -> Result<usize, QueryEvaluationError> {
        match self {
            Self::Solutions(solutions) => solutions.len(),
            Self::Boolean(_) => Ok(1),
            Self::Graph(graph) => Ok(graph.len()),
        }
    }

    /// Returns whether the result has no elements. Materializes solutions like [Self::len].
    pub fn is_empty(&mut self) -> Result<bool, QueryEvaluationError> {
        Ok(self.len()? == 0)
    }
}

impl From<QuerySolutionStream> for QueryResults {
    #[inline]
    fn from(value: QuerySolutionStream) -> Self {
        Self::Solutions(value)
    }
}

impl From<bool> for QueryResults {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Graph> for QueryResults {
    #[inline]
    fn from(value: Graph) -> Self {
        Self::Graph(value)
    }
}
