use crate::sparql::error::QueryEvaluationError;
use crate::sparql::evaluator::{ExpressionError, SimpleEvaluator, SolutionIter};
use crate::sparql::Bindings;
use rdf_loom_logical::algebra::{Expression, GraphPattern, OrderExpression};
use rdf_loom_model::order::compare_for_ordering;
use rdf_loom_model::Term;
use std::cmp::Ordering;
use std::sync::Arc;

/// `OPTIONAL`: joins every left solution with the solutions of the right pattern that pass the
/// filter, or emits the left solution unchanged if there are none.
pub(super) struct LeftJoinIterator {
    eval: SimpleEvaluator,
    left_iter: SolutionIter,
    right: Arc<GraphPattern>,
    expression: Option<Expression>,
    current: Option<LeftJoinState>,
}

struct LeftJoinState {
    left: Bindings,
    right_iter: SolutionIter,
    matched: bool,
}

impl LeftJoinIterator {
    pub(super) fn new(
        eval: SimpleEvaluator,
        left_iter: SolutionIter,
        right: Arc<GraphPattern>,
        expression: Option<Expression>,
    ) -> Self {
        Self {
            eval,
            left_iter,
            right,
            expression,
            current: None,
        }
    }
}

impl Iterator for LeftJoinIterator {
    type Item = Result<Bindings, QueryEvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                match self.left_iter.next()? {
                    Ok(left) => {
                        let right_iter = self.eval.evaluate_pattern(&self.right, left.clone());
                        self.current = Some(LeftJoinState {
                            left,
                            right_iter,
                            matched: false,
                        });
                    }
                    Err(error) => return Some(Err(error)),
                }
            }
            let state = self.current.as_mut()?;
            match state.right_iter.next() {
                Some(Ok(joined)) => {
                    match self.eval.filter_passes(self.expression.as_ref(), &joined) {
                        Ok(true) => {
                            state.matched = true;
                            return Some(Ok(joined));
                        }
                        Ok(false) => {}
                        Err(error) => return Some(Err(error)),
                    }
                }
                Some(Err(error)) => return Some(Err(error)),
                None => {
                    let finished = self.current.take()?;
                    if !finished.matched {
                        return Some(Ok(finished.left));
                    }
                }
            }
        }
    }
}

/// `MINUS`: removes the left solutions that are compatible with a right solution and share a
/// variable with it.
///
/// The right pattern is evaluated once, with empty bindings, when the first left solution
/// arrives.
pub(super) struct MinusIterator {
    eval: SimpleEvaluator,
    left_iter: SolutionIter,
    right: Arc<GraphPattern>,
    right_solutions: Option<Vec<Bindings>>,
}

impl MinusIterator {
    pub(super) fn new(
        eval: SimpleEvaluator,
        left_iter: SolutionIter,
        right: Arc<GraphPattern>,
    ) -> Self {
        Self {
            eval,
            left_iter,
            right,
            right_solutions: None,
        }
    }

    fn right_solutions(&mut self) -> Result<&[Bindings], QueryEvaluationError> {
        if self.right_solutions.is_none() {
            let solutions = self
                .eval
                .evaluate_pattern(&self.right, Bindings::new())
                .collect::<Result<Vec<_>, _>>()?;
            self.right_solutions = Some(solutions);
        }
        Ok(self.right_solutions.as_deref().unwrap_or_default())
    }
}

impl Iterator for MinusIterator {
    type Item = Result<Bindings, QueryEvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let left = match self.left_iter.next()? {
                Ok(left) => left,
                Err(error) => return Some(Err(error)),
            };
            let right_solutions = match self.right_solutions() {
                Ok(right_solutions) => right_solutions,
                Err(error) => return Some(Err(error)),
            };
            if !right_solutions
                .iter()
                .any(|right| excludes(&left, right))
            {
                return Some(Ok(left));
            }
        }
    }
}

/// Returns whether `right` removes `left` in a `MINUS`.
fn excludes(left: &Bindings, right: &Bindings) -> bool {
    let mut shared = false;
    for (variable, term) in right.iter() {
        if let Some(bound) = left.lookup(variable) {
            if bound != term {
                return false;
            }
            shared = true;
        }
    }
    shared
}

/// `ORDER BY`: reads the whole input on the first call to `next` and sorts it.
///
/// The sort is stable. Conditions that fail to evaluate sort like unbound values.
pub(super) struct OrderByIterator {
    eval: SimpleEvaluator,
    inner: Option<SolutionIter>,
    conditions: Vec<OrderExpression>,
    sorted: std::vec::IntoIter<Bindings>,
}

impl OrderByIterator {
    pub(super) fn new(
        eval: SimpleEvaluator,
        inner: SolutionIter,
        conditions: Vec<OrderExpression>,
    ) -> Self {
        Self {
            eval,
            inner: Some(inner),
            conditions,
            sorted: Vec::new().into_iter(),
        }
    }

    fn sort(&self, inner: SolutionIter) -> Result<Vec<Bindings>, QueryEvaluationError> {
        let mut keyed = Vec::new();
        for solution in inner {
            let solution = solution?;
            let keys = self
                .conditions
                .iter()
                .map(|condition| {
                    match self
                        .eval
                        .evaluate_expression_term(condition.expression(), &solution)
                    {
                        Ok(term) => Ok(Some(term)),
                        Err(ExpressionError::Expected(_)) => Ok(None),
                        Err(ExpressionError::Fault(error)) => Err(error),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            keyed.push((keys, solution));
        }
        keyed.sort_by(|(a, _), (b, _)| compare_keys(&self.conditions, a, b));
        Ok(keyed.into_iter().map(|(_, solution)| solution).collect())
    }
}

impl Iterator for OrderByIterator {
    type Item = Result<Bindings, QueryEvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(inner) = self.inner.take() {
            match self.sort(inner) {
                Ok(sorted) => self.sorted = sorted.into_iter(),
                Err(error) => return Some(Err(error)),
            }
        }
        self.sorted.next().map(Ok)
    }
}

fn compare_keys(
    conditions: &[OrderExpression],
    a: &[Option<Term>],
    b: &[Option<Term>],
) -> Ordering {
    for ((condition, a), b) in conditions.iter().zip(a).zip(b) {
        let ordering = compare_for_ordering(
            a.as_ref().map(Term::as_ref),
            b.as_ref().map(Term::as_ref),
        );
        let ordering = match condition {
            OrderExpression::Asc(_) => ordering,
            OrderExpression::Desc(_) => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
