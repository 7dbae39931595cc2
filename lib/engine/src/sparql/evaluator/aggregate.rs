use crate::sparql::error::QueryEvaluationError;
use crate::sparql::evaluator::{lazy, ExpressionError, SimpleEvaluator, SolutionIter};
use crate::sparql::Bindings;
use rdf_loom_functions::aggregates::{create_accumulator, Accumulator};
use rdf_loom_logical::algebra::{AggregateExpression, Expression, GraphPattern};
use rdf_loom_model::{Literal, Term, Variable};
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter::once;
use std::sync::Arc;

/// Evaluates a `GROUP BY` node.
///
/// Groups are emitted in the order in which their first solution arrived. Without group
/// variables there is exactly one group, even if the input is empty.
pub(super) fn evaluate_group(
    eval: &SimpleEvaluator,
    inner: &Arc<GraphPattern>,
    variables: &[Variable],
    aggregates: &[(Variable, AggregateExpression)],
    seed: Bindings,
) -> SolutionIter {
    let eval = eval.clone();
    let variables = variables.to_vec();
    let aggregates = aggregates.to_vec();
    let input = eval.evaluate_pattern(inner, seed.forget(&variables));
    lazy(move || {
        let groups = match group(&eval, input, &variables, &aggregates) {
            Ok(groups) => groups,
            Err(error) => return Box::new(once(Err(error))),
        };
        tracing::trace!(groups = groups.len(), "Grouped solutions");
        Box::new(groups.into_iter().filter_map(move |(key, accumulators)| {
            let mut values = variables
                .iter()
                .zip(key)
                .filter_map(|(variable, term)| Some((variable.clone(), term?)))
                .collect::<Vec<_>>();
            for ((variable, _), accumulator) in aggregates.iter().zip(accumulators) {
                if let Some(value) = accumulator.evaluate() {
                    values.push((variable.clone(), value));
                }
            }
            seed.combine(&Bindings::from_iter(values)).map(Ok)
        }))
    })
}

type Group = (Vec<Option<Term>>, Vec<GroupAccumulator>);

fn group(
    eval: &SimpleEvaluator,
    input: SolutionIter,
    variables: &[Variable],
    aggregates: &[(Variable, AggregateExpression)],
) -> Result<Vec<Group>, QueryEvaluationError> {
    let new_accumulators = || {
        aggregates
            .iter()
            .map(|(_, aggregate)| GroupAccumulator::new(aggregate))
            .collect::<Vec<_>>()
    };
    let mut groups: Vec<Group> = Vec::new();
    let mut positions = FxHashMap::default();
    if variables.is_empty() {
        groups.push((Vec::new(), new_accumulators()));
        positions.insert(Vec::new(), 0);
    }
    for solution in input {
        let solution = solution?;
        let key = variables
            .iter()
            .map(|variable| solution.lookup(variable).cloned())
            .collect::<Vec<_>>();
        let position = *positions.entry(key).or_insert_with_key(|key| {
            groups.push((key.clone(), new_accumulators()));
            groups.len() - 1
        });
        for accumulator in &mut groups[position].1 {
            accumulator.update(eval, &solution)?;
        }
    }
    Ok(groups)
}

enum GroupAccumulator {
    CountSolutions {
        count: i64,
    },
    CountDistinctSolutions {
        seen: FxHashSet<Vec<(Variable, Term)>>,
    },
    Function {
        expression: Expression,
        accumulator: Box<dyn Accumulator>,
    },
}

impl GroupAccumulator {
    fn new(aggregate: &AggregateExpression) -> Self {
        match aggregate {
            AggregateExpression::CountSolutions { distinct: false } => {
                Self::CountSolutions { count: 0 }
            }
            AggregateExpression::CountSolutions { distinct: true } => {
                Self::CountDistinctSolutions {
                    seen: FxHashSet::default(),
                }
            }
            AggregateExpression::FunctionCall {
                name,
                expr,
                distinct,
            } => Self::Function {
                expression: expr.clone(),
                accumulator: create_accumulator(name, *distinct),
            },
        }
    }

    fn update(
        &mut self,
        eval: &SimpleEvaluator,
        solution: &Bindings,
    ) -> Result<(), QueryEvaluationError> {
        match self {
            Self::CountSolutions { count } => *count += 1,
            Self::CountDistinctSolutions { seen } => {
                seen.insert(solution.key());
            }
            Self::Function {
                expression,
                accumulator,
            } => match eval.evaluate_expression_term(expression, solution) {
                Ok(value) => accumulator.update(Some(value.as_ref())),
                // Inputs that fail to evaluate are left out of the aggregate.
                Err(ExpressionError::Expected(_)) => {}
                Err(ExpressionError::Fault(error)) => return Err(error),
            },
        }
        Ok(())
    }

    fn evaluate(self) -> Option<Term> {
        match self {
            Self::CountSolutions { count } => Some(Literal::from(count).into()),
            Self::CountDistinctSolutions { seen } => {
                let count = i64::try_from(seen.len()).ok()?;
                Some(Literal::from(count).into())
            }
            Self::Function { accumulator, .. } => accumulator.evaluate().ok(),
        }
    }
}
