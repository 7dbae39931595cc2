use crate::sparql::error::QueryEvaluationError;
use rdf_loom_model::Variable;
use sparesults::QuerySolution;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type SolutionSource = Box<dyn Iterator<Item = Result<QuerySolution, QueryEvaluationError>>>;

/// An iterator over [`QuerySolution`]s.
///
/// Every solution that is pulled from the lazy source is kept in a buffer. Iterating moves a
/// cursor over the buffer first and then over the source, so direct iteration and the eager
/// [bindings](Self::bindings) accessor can be mixed in any order.
///
/// After the source returned an error, the stream is failed. Solutions pulled before the error
/// stay in the buffer and can still be iterated. The error is returned by every later call to
/// the eager accessors and once more by the iterator when it reaches the end of the buffer.
pub struct QuerySolutionStream {
    /// The variables used in the query solutions.
    variables: Arc<[Variable]>,
    /// All solutions pulled from the source so far.
    buffer: Vec<QuerySolution>,
    /// The position of the cursor in the buffer.
    position: usize,
    /// The lazy source. [None] once it is exhausted, has failed, or was replaced.
    source: Option<SolutionSource>,
    /// The error of the source, if it failed.
    failure: Option<QueryEvaluationError>,
    /// Whether the iterator has already returned the failure.
    failure_returned: bool,
}

impl QuerySolutionStream {
    /// Construct a new stream from an ordered list of solution variables and a lazy source of
    /// solutions.
    pub fn new(
        variables: Arc<[Variable]>,
        source: impl Iterator<Item = Result<QuerySolution, QueryEvaluationError>> + 'static,
    ) -> Self {
        Self {
            variables,
            buffer: Vec::new(),
            position: 0,
            source: Some(Box::new(source)),
            failure: None,
            failure_returned: false,
        }
    }

    /// The variables used in the solutions.
    #[inline]
    pub fn variables(&self) -> &[Variable] {
        self.variables.as_ref()
    }

    /// All solutions of the stream, including those already returned by the iterator.
    ///
    /// The remainder of the source is materialized on first use. The cursor does not move.
    pub fn bindings(&mut self) -> Result<&[QuerySolution], QueryEvaluationError> {
        while self.pull()? {}
        Ok(&self.buffer)
    }

    /// Replaces all solutions of the stream. The lazy source is dropped and the cursor is
    /// moved to the first of the new solutions.
    pub fn set_bindings(&mut self, solutions: Vec<QuerySolution>) {
        self.buffer = solutions;
        self.position = 0;
        self.source = None;
        self.failure = None;
        self.failure_returned = false;
    }

    /// The number of solutions. Materializes the stream.
    pub fn len(&mut self) -> Result<usize, QueryEvaluationError> {
        Ok(self.bindings()?.len())
    }

    /// Returns whether the stream has no solutions. Only pulls the first solution.
    pub fn is_empty(&mut self) -> Result<bool, QueryEvaluationError> {
        if self.position < self.buffer.len() {
            return Ok(false);
        }
        Ok(!self.pull()?)
    }

    /// Pulls one solution from the source into the buffer. Returns whether there was one.
    fn pull(&mut self) -> Result<bool, QueryEvaluationError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        let Some(source) = &mut self.source else {
            return Ok(false);
        };
        match source.next() {
            Some(Ok(solution)) => {
                self.buffer.push(solution);
                Ok(true)
            }
            Some(Err(error)) => {
                self.source = None;
                self.failure = Some(error.clone());
                Err(error)
            }
            None => {
                self.source = None;
                Ok(false)
            }
        }
    }
}

impl Iterator for QuerySolutionStream {
    type Item = Result<QuerySolution, QueryEvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position == self.buffer.len() {
            match self.pull() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(_) if self.failure_returned => return None,
                Err(error) => {
                    self.failure_returned = true;
                    return Some(Err(error));
                }
            }
        }
        let solution = self.buffer.get(self.position)?;
        let solution =
            QuerySolution::from((Arc::clone(&self.variables), solution.values().to_vec()));
        self.position += 1;
        Some(Ok(solution))
    }
}

impl Debug for QuerySolutionStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySolutionStream")
            .field("variables", &self.variables)
            .field("buffered", &self.buffer.len())
            .field("position", &self.position)
            .field("exhausted", &self.source.is_none())
            .field("failed", &self.failure.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::{Literal, Term};
    use std::cell::Cell;
    use std::rc::Rc;

    fn variables() -> Arc<[Variable]> {
        vec![Variable::new_unchecked("x")].into()
    }

    fn solution(value: i64) -> QuerySolution {
        let term: Term = Literal::from(value).into();
        QuerySolution::from((variables(), vec![Some(term)]))
    }

    fn stream(values: Vec<i64>, pulled: Rc<Cell<usize>>) -> QuerySolutionStream {
        QuerySolutionStream::new(
            variables(),
            values.into_iter().map(move |value| {
                pulled.set(pulled.get() + 1);
                Ok(solution(value))
            }),
        )
    }

    #[test]
    fn iteration_is_lazy() {
        let pulled = Rc::new(Cell::new(0));
        let mut solutions = stream(vec![1, 2, 3], Rc::clone(&pulled));
        assert_eq!(pulled.get(), 0);
        assert_eq!(solutions.next().unwrap().unwrap(), solution(1));
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn bindings_keep_solutions_that_were_already_pulled() {
        let mut solutions = stream(vec![1, 2, 3], Rc::new(Cell::new(0)));
        assert_eq!(solutions.next().unwrap().unwrap(), solution(1));
        assert_eq!(
            solutions.bindings().unwrap(),
            &[solution(1), solution(2), solution(3)]
        );
        let rest = solutions.map(Result::unwrap).collect::<Vec<_>>();
        assert_eq!(rest, vec![solution(2), solution(3)]);
    }

    #[test]
    fn set_bindings_replaces_the_source() {
        let pulled = Rc::new(Cell::new(0));
        let mut solutions = stream(vec![1, 2, 3], Rc::clone(&pulled));
        assert_eq!(solutions.next().unwrap().unwrap(), solution(1));
        solutions.set_bindings(vec![solution(7)]);
        assert_eq!(solutions.len().unwrap(), 1);
        let all = solutions.map(Result::unwrap).collect::<Vec<_>>();
        assert_eq!(all, vec![solution(7)]);
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn error_is_kept_by_the_stream() {
        let source = vec![
            Ok(solution(1)),
            Err(QueryEvaluationError::extension("broken")),
            Ok(solution(2)),
        ];
        let mut solutions = QuerySolutionStream::new(variables(), source.into_iter());
        assert!(solutions.next().unwrap().is_ok());
        assert!(matches!(
            solutions.next(),
            Some(Err(QueryEvaluationError::Extension(_)))
        ));
        assert!(solutions.next().is_none());
        assert!(matches!(
            solutions.bindings(),
            Err(QueryEvaluationError::Extension(_))
        ));
        assert!(solutions.len().is_err());
        assert!(solutions.is_empty().is_err());
    }

    #[test]
    fn iteration_after_a_failed_materialization() {
        let source = vec![
            Ok(solution(1)),
            Ok(solution(2)),
            Err(QueryEvaluationError::extension("broken")),
        ];
        let mut solutions = QuerySolutionStream::new(variables(), source.into_iter());
        assert!(solutions.bindings().is_err());
        assert_eq!(solutions.next().unwrap().unwrap(), solution(1));
        assert_eq!(solutions.next().unwrap().unwrap(), solution(2));
        assert!(solutions.next().unwrap().is_err());
        assert!(solutions.next().is_none());
        assert!(solutions.bindings().is_err());
    }
}
