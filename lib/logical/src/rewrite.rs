//! Query rewriting.
//!
//! A [QueryRewriter] turns a [Query] into an equivalent one. Rewriters must not change the
//! solutions of a query for any store content. They may only change the order in which the
//! evaluator does its work.

use crate::algebra::GraphPattern;
use crate::query::Query;
use std::sync::Arc;

/// A semantics-preserving transformation of a [Query].
pub trait QueryRewriter: Send + Sync {
    /// A name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn rewrite(&self, query: Query) -> Query;
}

impl<F> QueryRewriter for F
where
    F: Fn(Query) -> Query + Send + Sync,
{
    fn rewrite(&self, query: Query) -> Query {
        self(query)
    }
}

/// Applies `rewriters` in order.
pub fn apply_rewriters(query: Query, rewriters: &[Arc<dyn QueryRewriter>]) -> Query {
    rewriters.iter().fold(query, |query, rewriter| {
        tracing::debug!(rewriter = rewriter.name(), "Rewriting query");
        rewriter.rewrite(query)
    })
}

/// Moves inline data to the left of a join.
///
/// The evaluator seeds the right operand of a join with each solution of the left operand.
/// Evaluating the `VALUES` block first turns its rows into lookup constraints for the other
/// operand instead of filtering a potentially large intermediate result.
///
/// Only basic graph patterns and property paths are moved to the right. Their solutions are the
/// same with or without a seed. A filter or a sub-select may observe the seeded variables and
/// is left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValuesFirstRewriter;

impl ValuesFirstRewriter {
    pub fn new() -> Self {
        Self
    }

    fn rewrite_pattern(pattern: &Arc<GraphPattern>) -> Arc<GraphPattern> {
        let rewritten = match pattern.as_ref() {
            GraphPattern::Join { left, right } => {
                let left = Self::rewrite_pattern(left);
                let right = Self::rewrite_pattern(right);
                if matches!(right.as_ref(), GraphPattern::Values { .. })
                    && matches!(
                        left.as_ref(),
                        GraphPattern::Bgp { .. } | GraphPattern::Path { .. }
                    )
                {
                    GraphPattern::Join {
                        left: right,
                        right: left,
                    }
                } else {
                    GraphPattern::Join { left, right }
                }
            }
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => GraphPattern::LeftJoin {
                left: Self::rewrite_pattern(left),
                right: Self::rewrite_pattern(right),
                expression: expression.clone(),
            },
            GraphPattern::Filter { expr, inner } => GraphPattern::Filter {
                expr: expr.clone(),
                inner: Self::rewrite_pattern(inner),
            },
            GraphPattern::Union { left, right } => GraphPattern::Union {
                left: Self::rewrite_pattern(left),
                right: Self::rewrite_pattern(right),
            },
            GraphPattern::Minus { left, right } => GraphPattern::Minus {
                left: Self::rewrite_pattern(left),
                right: Self::rewrite_pattern(right),
            },
            GraphPattern::Graph { name, inner } => GraphPattern::Graph {
                name: name.clone(),
                inner: Self::rewrite_pattern(inner),
            },
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => GraphPattern::Extend {
                inner: Self::rewrite_pattern(inner),
                variable: variable.clone(),
                expression: expression.clone(),
            },
            GraphPattern::OrderBy { inner, expression } => GraphPattern::OrderBy {
                inner: Self::rewrite_pattern(inner),
                expression: expression.clone(),
            },
            GraphPattern::Project { inner, variables } => GraphPattern::Project {
                inner: Self::rewrite_pattern(inner),
                variables: variables.clone(),
            },
            GraphPattern::Distinct { inner } => GraphPattern::Distinct {
                inner: Self::rewrite_pattern(inner),
            },
            GraphPattern::Reduced { inner } => GraphPattern::Reduced {
                inner: Self::rewrite_pattern(inner),
            },
            GraphPattern::Slice {
                inner,
                start,
                length,
            } => GraphPattern::Slice {
                inner: Self::rewrite_pattern(inner),
                start: *start,
                length: *length,
            },
            GraphPattern::Group {
                inner,
                variables,
                aggregates,
            } => GraphPattern::Group {
                inner: Self::rewrite_pattern(inner),
                variables: variables.clone(),
                aggregates: aggregates.clone(),
            },
            GraphPattern::ToMultiSet { inner } => GraphPattern::ToMultiSet {
                inner: Self::rewrite_pattern(inner),
            },
            GraphPattern::Bgp { .. }
            | GraphPattern::Path { .. }
            | GraphPattern::Values { .. }
            | GraphPattern::Service { .. } => return Arc::clone(pattern),
        };
        Arc::new(rewritten)
    }
}

impl QueryRewriter for ValuesFirstRewriter {
    fn name(&self) -> &str {
        "values_first"
    }

    fn rewrite(&self, query: Query) -> Query {
        let pattern = Self::rewrite_pattern(&query.pattern);
        query.with_pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Expression, TriplePattern};
    use crate::query::{Namespaces, QueryForm};
    use rdf_loom_model::{Literal, NamedNode, Variable};

    fn query(pattern: GraphPattern) -> Query {
        Query {
            form: QueryForm::Select {
                variables: vec![Variable::new_unchecked("s")],
            },
            pattern: Arc::new(pattern),
            dataset: None,
            base_iri: None,
            source: String::new(),
            namespaces: Namespaces::new(),
        }
    }

    fn bgp() -> GraphPattern {
        GraphPattern::Bgp {
            patterns: vec![TriplePattern::new(
                Variable::new_unchecked("s"),
                NamedNode::new_unchecked("http://example.com/p"),
                Variable::new_unchecked("o"),
            )],
        }
    }

    fn values() -> GraphPattern {
        GraphPattern::Values {
            variables: vec![Variable::new_unchecked("o")],
            bindings: vec![vec![Some(Literal::new_simple_literal("x").into())]],
        }
    }

    #[test]
    fn values_first_swaps_join_operands() {
        let original = query(GraphPattern::Join {
            left: Arc::new(bgp()),
            right: Arc::new(values()),
        });
        let rewritten = ValuesFirstRewriter::new().rewrite(original);
        assert_eq!(
            rewritten.pattern.as_ref(),
            &GraphPattern::Join {
                left: Arc::new(values()),
                right: Arc::new(bgp()),
            }
        );
    }

    #[test]
    fn values_first_keeps_a_filtered_operand_in_place() {
        let filtered = GraphPattern::Filter {
            expr: Expression::Bound(Variable::new_unchecked("o")),
            inner: Arc::new(bgp()),
        };
        let original = GraphPattern::Join {
            left: Arc::new(filtered),
            right: Arc::new(values()),
        };
        let rewritten = ValuesFirstRewriter::new().rewrite(query(original.clone()));
        assert_eq!(rewritten.pattern.as_ref(), &original);
    }

    #[test]
    fn closures_are_rewriters() {
        let rewriters: Vec<Arc<dyn QueryRewriter>> = vec![Arc::new(|query: Query| {
            let pattern = GraphPattern::Distinct {
                inner: Arc::clone(&query.pattern),
            };
            query.with_pattern(pattern)
        })];
        let rewritten = apply_rewriters(query(bgp()), &rewriters);
        assert!(matches!(
            rewritten.pattern.as_ref(),
            GraphPattern::Distinct { .. }
        ));
    }
}
