//! The lazy evaluation of the SPARQL algebra.
//!
//! Every node is evaluated into a [SolutionIter] with respect to a seed [Bindings]. The seed
//! constrains the evaluation: a join evaluates its right operand once for every solution of its
//! left operand, seeded with that solution. Solutions are only computed when the iterator is
//! pulled, except for the operators that need their whole input (`ORDER BY`, `GROUP BY`).

mod aggregate;
mod expression;
mod iterators;
mod path;

pub use expression::ExpressionError;

use crate::sparql::dataset::{ActiveGraph, DatasetView};
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::hooks::evaluation_hook;
use crate::sparql::{Bindings, CustomFunction};
use iterators::{LeftJoinIterator, MinusIterator, OrderByIterator};
use rdf_loom_functions::dispatch::FunctionContext;
use rdf_loom_logical::algebra::{
    Expression, GraphPattern, NamedNodePattern, TermPattern, TriplePattern,
};
use rdf_loom_model::{NamedNode, NamedOrBlankNode, SubjectRef, Term, TermRef, Triple, Variable};
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter::{empty, once, once_with};
use std::sync::Arc;

/// A lazy sequence of solutions.
pub type SolutionIter = Box<dyn Iterator<Item = Result<Bindings, QueryEvaluationError>>>;

/// Evaluates graph patterns against a [DatasetView].
///
/// The evaluator is cheap to clone. The lazy iterators it returns hold a clone of it.
#[derive(Clone)]
pub struct SimpleEvaluator {
    dataset: Arc<DatasetView>,
    context: Arc<FunctionContext>,
    custom_functions: Arc<FxHashMap<NamedNode, CustomFunction>>,
    graph: ActiveGraph,
}

impl SimpleEvaluator {
    pub(crate) fn new(
        dataset: DatasetView,
        context: FunctionContext,
        custom_functions: FxHashMap<NamedNode, CustomFunction>,
    ) -> Self {
        Self {
            dataset: Arc::new(dataset),
            context: Arc::new(context),
            custom_functions: Arc::new(custom_functions),
            graph: ActiveGraph::Default,
        }
    }

    /// The graph that triple patterns are currently matched against.
    pub fn active_graph(&self) -> &ActiveGraph {
        &self.graph
    }

    /// Evaluates `pattern`. A registered evaluation hook for the kind of `pattern` takes
    /// precedence over the built-in evaluation.
    pub fn evaluate_pattern(&self, pattern: &Arc<GraphPattern>, seed: Bindings) -> SolutionIter {
        let kind = pattern.kind();
        if let Some(hook) = evaluation_hook(kind) {
            tracing::debug!(%kind, "Evaluating node with a hook");
            return hook(self, pattern, seed);
        }
        self.evaluate_builtin_pattern(pattern, seed)
    }

    /// Evaluates `pattern` with the built-in semantics, even if a hook is registered for its
    /// kind. Hooks for the children still apply.
    pub fn evaluate_builtin_pattern(
        &self,
        pattern: &Arc<GraphPattern>,
        seed: Bindings,
    ) -> SolutionIter {
        tracing::trace!(kind = %pattern.kind(), "Evaluating node");
        match pattern.as_ref() {
            GraphPattern::Bgp { patterns } => self.evaluate_bgp(patterns, seed),
            GraphPattern::Path {
                subject,
                path,
                object,
            } => path::evaluate_path(self, subject, path, object, seed),
            GraphPattern::Join { left, right } => {
                let eval = self.clone();
                let right = Arc::clone(right);
                Box::new(
                    self.evaluate_pattern(left, seed)
                        .flat_map(move |solution| match solution {
                            Ok(solution) => eval.evaluate_pattern(&right, solution),
                            Err(error) => error_iter(error),
                        }),
                )
            }
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => Box::new(LeftJoinIterator::new(
                self.clone(),
                self.evaluate_pattern(left, seed),
                Arc::clone(right),
                expression.clone(),
            )),
            GraphPattern::Filter { expr, inner } => {
                let eval = self.clone();
                let expr = expr.clone();
                Box::new(
                    self.evaluate_pattern(inner, seed)
                        .filter_map(move |solution| match solution {
                            Ok(solution) => match eval.filter_passes(Some(&expr), &solution) {
                                Ok(true) => Some(Ok(solution)),
                                Ok(false) => None,
                                Err(error) => Some(Err(error)),
                            },
                            Err(error) => Some(Err(error)),
                        }),
                )
            }
            GraphPattern::Union { left, right } => {
                let eval = self.clone();
                let right = Arc::clone(right);
                let right_seed = seed.clone();
                Box::new(
                    self.evaluate_pattern(left, seed)
                        .chain(lazy(move || eval.evaluate_pattern(&right, right_seed))),
                )
            }
            GraphPattern::Minus { left, right } => Box::new(MinusIterator::new(
                self.clone(),
                self.evaluate_pattern(left, seed),
                Arc::clone(right),
            )),
            GraphPattern::Graph { name, inner } => self.evaluate_graph(name, inner, seed),
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => {
                let eval = self.clone();
                let variable = variable.clone();
                let expression = expression.clone();
                Box::new(
                    self.evaluate_pattern(inner, seed)
                        .filter_map(move |solution| {
                            let solution = match solution {
                                Ok(solution) => solution,
                                Err(error) => return Some(Err(error)),
                            };
                            match eval.evaluate_expression_term(&expression, &solution) {
                                Ok(term) => match solution.lookup(&variable).map(|b| *b == term) {
                                    Some(true) => Some(Ok(solution)),
                                    Some(false) => None,
                                    None => Some(Ok(solution.with(variable.clone(), term))),
                                },
                                Err(ExpressionError::Expected(_)) => Some(Ok(solution)),
                                Err(ExpressionError::Fault(error)) => Some(Err(error)),
                            }
                        }),
                )
            }
            GraphPattern::Values {
                variables,
                bindings,
            } => {
                let variables = variables.clone();
                let rows = bindings.clone();
                Box::new(rows.into_iter().filter_map(move |row| {
                    let row = variables
                        .iter()
                        .zip(row)
                        .filter_map(|(variable, term)| Some((variable.clone(), term?)))
                        .collect::<Bindings>();
                    seed.combine(&row).map(Ok)
                }))
            }
            GraphPattern::OrderBy { inner, expression } => Box::new(OrderByIterator::new(
                self.clone(),
                self.evaluate_pattern(inner, seed),
                expression.clone(),
            )),
            GraphPattern::Project { inner, variables } => {
                let variables = variables.clone();
                let inner_seed = seed.forget(&variables);
                Box::new(
                    self.evaluate_pattern(inner, inner_seed)
                        .filter_map(move |solution| match solution {
                            Ok(solution) => seed.combine(&solution.project(&variables)).map(Ok),
                            Err(error) => Some(Err(error)),
                        }),
                )
            }
            GraphPattern::Distinct { inner } => {
                let mut seen = FxHashSet::default();
                Box::new(
                    self.evaluate_pattern(inner, seed)
                        .filter(move |solution| match solution {
                            Ok(solution) => seen.insert(solution.key()),
                            Err(_) => true,
                        }),
                )
            }
            GraphPattern::Reduced { inner } => {
                let mut last = None;
                Box::new(
                    self.evaluate_pattern(inner, seed)
                        .filter(move |solution| match solution {
                            Ok(solution) => {
                                let key = solution.key();
                                if last.as_ref() == Some(&key) {
                                    false
                                } else {
                                    last = Some(key);
                                    true
                                }
                            }
                            Err(_) => true,
                        }),
                )
            }
            GraphPattern::Slice {
                inner,
                start,
                length,
            } => {
                let start = *start;
                let mut skipped = 0;
                // Errors are never skipped.
                let iter = self
                    .evaluate_pattern(inner, seed)
                    .filter(move |solution| {
                        if solution.is_err() || skipped >= start {
                            true
                        } else {
                            skipped += 1;
                            false
                        }
                    });
                match length {
                    Some(length) => Box::new(iter.take(*length)),
                    None => Box::new(iter),
                }
            }
            GraphPattern::Group {
                inner,
                variables,
                aggregates,
            } => aggregate::evaluate_group(self, inner, variables, aggregates, seed),
            GraphPattern::ToMultiSet { inner } => {
                // A sub-select is evaluated on its own. Only the initial bindings flow into it,
                // so its LIMIT and OFFSET do not depend on the solution it is joined with.
                Box::new(
                    self.evaluate_pattern(inner, seed.forget([]))
                        .filter_map(move |solution| match solution {
                            Ok(solution) => seed.combine(&solution).map(Ok),
                            Err(error) => Some(Err(error)),
                        }),
                )
            }
            GraphPattern::Service { name, silent, .. } => {
                if *silent {
                    tracing::warn!(service = %name, "Skipping unsupported silent SERVICE");
                    Box::new(once(Ok(seed)))
                } else {
                    error_iter(QueryEvaluationError::UnsupportedService(name.clone()))
                }
            }
        }
    }

    /// Evaluates `expression` on `bindings`. Expected errors (e.g., type errors) yield [None].
    pub fn evaluate_expression(
        &self,
        expression: &Expression,
        bindings: &Bindings,
    ) -> Result<Option<Term>, QueryEvaluationError> {
        match self.evaluate_expression_term(expression, bindings) {
            Ok(term) => Ok(Some(term)),
            Err(ExpressionError::Expected(_)) => Ok(None),
            Err(ExpressionError::Fault(error)) => Err(error),
        }
    }

    /// Returns whether a solution passes a filter. Expected errors count as `false`.
    fn filter_passes(
        &self,
        expression: Option<&Expression>,
        bindings: &Bindings,
    ) -> Result<bool, QueryEvaluationError> {
        let Some(expression) = expression else {
            return Ok(true);
        };
        match self.effective_boolean_value(expression, bindings) {
            Ok(value) => Ok(value),
            Err(ExpressionError::Expected(_)) => Ok(false),
            Err(ExpressionError::Fault(error)) => Err(error),
        }
    }

    /// The triples of the active graph with `subject` as subject.
    pub(crate) fn triples_with_subject(
        &self,
        subject: SubjectRef<'_>,
    ) -> Result<Vec<Triple>, QueryEvaluationError> {
        Ok(self
            .dataset
            .triples_for_pattern(&self.graph, Some(subject), None, None)?)
    }

    fn with_graph(&self, graph: ActiveGraph) -> Self {
        Self {
            graph,
            ..self.clone()
        }
    }

    fn evaluate_bgp(&self, patterns: &[TriplePattern], seed: Bindings) -> SolutionIter {
        let mut iter: SolutionIter = Box::new(once(Ok(seed)));
        for pattern in patterns.iter().cloned() {
            let eval = self.clone();
            iter = Box::new(iter.flat_map(move |solution| match solution {
                Ok(solution) => eval.evaluate_triple_pattern(&pattern, solution),
                Err(error) => error_iter(error),
            }));
        }
        iter
    }

    fn evaluate_triple_pattern(&self, pattern: &TriplePattern, bindings: Bindings) -> SolutionIter {
        let subject = resolve_term(&pattern.subject, &bindings);
        let predicate = match &pattern.predicate {
            NamedNodePattern::NamedNode(node) => Some(node.as_ref()),
            NamedNodePattern::Variable(variable) => match bindings.lookup(variable) {
                Some(Term::NamedNode(node)) => Some(node.as_ref()),
                Some(_) => return Box::new(empty()),
                None => None,
            },
        };
        let object = resolve_term(&pattern.object, &bindings);
        let subject = match subject {
            Some(TermRef::NamedNode(node)) => Some(SubjectRef::NamedNode(node)),
            Some(TermRef::BlankNode(node)) => Some(SubjectRef::BlankNode(node)),
            Some(TermRef::Literal(_)) => return Box::new(empty()),
            None => None,
        };
        let triples = match self
            .dataset
            .triples_for_pattern(&self.graph, subject, predicate, object)
        {
            Ok(triples) => triples,
            Err(error) => return error_iter(error.into()),
        };
        let pattern = pattern.clone();
        Box::new(triples.into_iter().filter_map(move |triple| {
            bind_triple(&pattern, triple, &bindings).map(Ok)
        }))
    }

    fn evaluate_graph(
        &self,
        name: &NamedNodePattern,
        inner: &Arc<GraphPattern>,
        seed: Bindings,
    ) -> SolutionIter {
        let variable = match name {
            NamedNodePattern::NamedNode(node) => {
                return self
                    .with_graph(ActiveGraph::Named(node.clone().into()))
                    .evaluate_pattern(inner, seed)
            }
            NamedNodePattern::Variable(variable) => variable.clone(),
        };
        let eval = self.clone();
        let inner = Arc::clone(inner);
        if let Some(bound) = seed.lookup(&variable) {
            let graph = match bound.clone() {
                Term::NamedNode(node) => NamedOrBlankNode::from(node),
                Term::BlankNode(node) => NamedOrBlankNode::from(node),
                Term::Literal(_) => return Box::new(empty()),
            };
            return lazy(move || match eval.dataset.contains_named_graph(graph.as_ref()) {
                Ok(true) => eval
                    .with_graph(ActiveGraph::Named(graph))
                    .evaluate_pattern(&inner, seed),
                Ok(false) => Box::new(empty()),
                Err(error) => error_iter(error.into()),
            });
        }
        lazy(move || {
            let graphs = match eval.dataset.named_graphs() {
                Ok(graphs) => graphs,
                Err(error) => return error_iter(error.into()),
            };
            tracing::trace!(graphs = graphs.len(), "Evaluating GRAPH over named graphs");
            Box::new(graphs.into_iter().flat_map(move |graph| {
                let solution = seed.with(variable.clone(), graph_term(graph.clone()));
                eval.with_graph(ActiveGraph::Named(graph))
                    .evaluate_pattern(&inner, solution)
            }))
        })
    }
}

/// Defers the creation of an iterator until its first element is pulled.
fn lazy(create: impl FnOnce() -> SolutionIter + 'static) -> SolutionIter {
    Box::new(once_with(create).flatten())
}

fn error_iter(error: QueryEvaluationError) -> SolutionIter {
    Box::new(once(Err(error)))
}

fn resolve_term<'a>(pattern: &'a TermPattern, bindings: &'a Bindings) -> Option<TermRef<'a>> {
    match pattern {
        TermPattern::Variable(variable) => bindings.lookup(variable).map(Term::as_ref),
        pattern => pattern.as_term(),
    }
}

fn graph_term(graph: NamedOrBlankNode) -> Term {
    match graph {
        NamedOrBlankNode::NamedNode(node) => node.into(),
        NamedOrBlankNode::BlankNode(node) => node.into(),
    }
}

/// Extends `bindings` with the variables of `pattern` bound to the components of `triple`.
///
/// Returns [None] if a variable occurs more than once in the pattern and the matching
/// components differ.
fn bind_triple(pattern: &TriplePattern, triple: Triple, bindings: &Bindings) -> Option<Bindings> {
    let mut values = Vec::with_capacity(3);
    if let TermPattern::Variable(variable) = &pattern.subject {
        bind_new(&mut values, bindings, variable, triple.subject.into())?;
    }
    if let NamedNodePattern::Variable(variable) = &pattern.predicate {
        bind_new(&mut values, bindings, variable, triple.predicate.into())?;
    }
    if let TermPattern::Variable(variable) = &pattern.object {
        bind_new(&mut values, bindings, variable, triple.object)?;
    }
    Some(bindings.merge(values))
}

fn bind_new(
    values: &mut Vec<(Variable, Term)>,
    bindings: &Bindings,
    variable: &Variable,
    term: Term,
) -> Option<()> {
    if bindings.contains(variable) {
        return Some(());
    }
    match values.iter().find(|(v, _)| v == variable) {
        Some((_, bound)) => (*bound == term).then_some(()),
        None => {
            values.push((variable.clone(), term));
            Some(())
        }
    }
}
