use crate::algebra::{Expression, GraphPattern, NamedNodePattern};
use crate::error::TranslationError;
use crate::translate::Translator;
use rdf_loom_parser::ast::{GroupElement, GroupGraphPattern, InlineData, VarOrIri};
use std::sync::Arc;

/// Joins two patterns. The empty singleton is the identity and adjacent BGPs are merged.
pub(super) fn join(left: GraphPattern, right: GraphPattern) -> GraphPattern {
    if left.is_empty_singleton() {
        return right;
    }
    if right.is_empty_singleton() {
        return left;
    }
    match (left, right) {
        (GraphPattern::Bgp { patterns: mut left }, GraphPattern::Bgp { patterns: right }) => {
            left.extend(right);
            GraphPattern::Bgp { patterns: left }
        }
        (left, right) => GraphPattern::Join {
            left: Arc::new(left),
            right: Arc::new(right),
        },
    }
}

impl Translator {
    /// Translates `{ ... }`.
    ///
    /// Elements are folded from left to right. The filters of the group apply to the whole
    /// group and wrap the result.
    pub(super) fn translate_group(
        &mut self,
        group: &GroupGraphPattern,
    ) -> Result<GraphPattern, TranslationError> {
        // Aggregates of an enclosing SELECT are not visible inside of a group.
        let aggregates = self.aggregates.take();
        let result = match group {
            GroupGraphPattern::SubSelect(sub_select) => {
                self.translate_sub_select(sub_select)
                    .map(|inner| GraphPattern::ToMultiSet {
                        inner: Arc::new(inner),
                    })
            }
            GroupGraphPattern::Group(elements) => self.translate_group_elements(elements),
        };
        self.aggregates = aggregates;
        result
    }

    fn translate_group_elements(
        &mut self,
        elements: &[GroupElement],
    ) -> Result<GraphPattern, TranslationError> {
        let mut pattern = GraphPattern::empty_singleton();
        let mut filters = Vec::new();
        for element in elements {
            pattern = match element {
                GroupElement::Triples(triples) => {
                    join(pattern, self.translate_triples_block(triples)?)
                }
                GroupElement::Optional(optional) => {
                    let (right, expression) = match self.translate_group(optional)? {
                        GraphPattern::Filter { expr, inner } => {
                            (Arc::unwrap_or_clone(inner), Some(expr))
                        }
                        right => (right, None),
                    };
                    GraphPattern::LeftJoin {
                        left: Arc::new(pattern),
                        right: Arc::new(right),
                        expression,
                    }
                }
                GroupElement::Union(branches) => {
                    let mut union: Option<GraphPattern> = None;
                    for branch in branches {
                        let branch = self.translate_group(branch)?;
                        union = Some(match union {
                            Some(left) => GraphPattern::Union {
                                left: Arc::new(left),
                                right: Arc::new(branch),
                            },
                            None => branch,
                        });
                    }
                    match union {
                        Some(union) => join(pattern, union),
                        None => pattern,
                    }
                }
                GroupElement::Minus(minus) => GraphPattern::Minus {
                    left: Arc::new(pattern),
                    right: Arc::new(self.translate_group(minus)?),
                },
                GroupElement::Graph(name, inner) => {
                    let graph = GraphPattern::Graph {
                        name: self.named_node_pattern(name)?,
                        inner: Arc::new(self.translate_group(inner)?),
                    };
                    join(pattern, graph)
                }
                GroupElement::Service {
                    silent,
                    name,
                    pattern: inner,
                } => {
                    let service = GraphPattern::Service {
                        name: self.named_node_pattern(name)?,
                        inner: Arc::new(self.translate_group(inner)?),
                        silent: *silent,
                    };
                    join(pattern, service)
                }
                GroupElement::Filter(expr) => {
                    filters.push(self.translate_expression(expr)?);
                    pattern
                }
                GroupElement::Bind { expr, var, span } => {
                    let variable = Self::variable(var);
                    if pattern.in_scope_variables().contains(&variable) {
                        return Err(TranslationError::VariableAlreadyBound {
                            variable: var.name.clone(),
                            span: *span,
                        });
                    }
                    GraphPattern::Extend {
                        expression: self.translate_expression(expr)?,
                        inner: Arc::new(pattern),
                        variable,
                    }
                }
                GroupElement::Values(data) => join(pattern, self.translate_inline_data(data)?),
            };
        }
        Ok(match filters.into_iter().reduce(Expression::and) {
            Some(expr) => GraphPattern::Filter {
                expr,
                inner: Arc::new(pattern),
            },
            None => pattern,
        })
    }

    pub(super) fn translate_inline_data(
        &self,
        data: &InlineData,
    ) -> Result<GraphPattern, TranslationError> {
        let variables = data.variables.iter().map(Self::variable).collect();
        let mut bindings = Vec::with_capacity(data.rows.len());
        for row in &data.rows {
            let mut values = Vec::with_capacity(row.len());
            for value in row {
                values.push(match value {
                    Some(term) => Some(self.constant_term(term)?),
                    None => None,
                });
            }
            bindings.push(values);
        }
        Ok(GraphPattern::Values {
            variables,
            bindings,
        })
    }

    pub(super) fn named_node_pattern(
        &self,
        name: &VarOrIri,
    ) -> Result<NamedNodePattern, TranslationError> {
        Ok(match name {
            VarOrIri::Var(var) => Self::variable(var).into(),
            VarOrIri::Iri(iri) => self.named_node(iri)?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::TriplePattern;
    use rdf_loom_model::{NamedNode, Variable};

    fn bgp(predicate: &str) -> GraphPattern {
        GraphPattern::Bgp {
            patterns: vec![TriplePattern::new(
                Variable::new_unchecked("s"),
                NamedNode::new_unchecked(format!("http://example.com/{predicate}")),
                Variable::new_unchecked("o"),
            )],
        }
    }

    #[test]
    fn join_with_empty_singleton_is_identity() {
        assert_eq!(join(GraphPattern::empty_singleton(), bgp("a")), bgp("a"));
        assert_eq!(join(bgp("a"), GraphPattern::empty_singleton()), bgp("a"));
    }

    #[test]
    fn join_merges_bgps() {
        let GraphPattern::Bgp { patterns } = join(bgp("a"), bgp("b")) else {
            panic!("expected a BGP");
        };
        assert_eq!(patterns.len(), 2);
    }
}
