//! Property paths that the translation could not rewrite into joins and unions.
//!
//! A path is evaluated from a start node into the set of reachable end nodes. Closures (`*` and
//! `+`) are computed with a breadth-first search that visits every node at most once, which
//! also makes them terminate on cyclic data.

use crate::sparql::dataset::{ActiveGraph, DatasetView};
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::evaluator::{lazy, resolve_term, SimpleEvaluator, SolutionIter};
use crate::sparql::Bindings;
use rdf_loom_common::error::StorageError;
use rdf_loom_logical::algebra::{PropertyPathExpression, TermPattern};
use rdf_loom_model::{NamedNode, SubjectRef, Term, TermRef, Triple, Variable};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::iter::{empty, once};
use std::sync::Arc;

pub(super) fn evaluate_path(
    eval: &SimpleEvaluator,
    subject: &TermPattern,
    path: &PropertyPathExpression,
    object: &TermPattern,
    seed: Bindings,
) -> SolutionIter {
    let walker = PathWalker {
        dataset: Arc::clone(&eval.dataset),
        graph: eval.graph.clone(),
    };
    let start = resolve_term(subject, &seed).map(TermRef::into_owned);
    let end = resolve_term(object, &seed).map(TermRef::into_owned);
    let path = path.clone();
    let subject_variable = subject.as_variable().cloned();
    let object_variable = object.as_variable().cloned();
    lazy(move || match (start, end) {
        (Some(start), Some(end)) => match walker.reachable(&start, &path, false) {
            Ok(reached) if reached.contains(&end) => Box::new(once(Ok(seed))),
            Ok(_) => Box::new(empty()),
            Err(error) => Box::new(once(Err(error.into()))),
        },
        (Some(start), None) => {
            let reached = match walker.reachable(&start, &path, false) {
                Ok(reached) => reached,
                Err(error) => return Box::new(once(Err(error.into()))),
            };
            bind_each(seed, object_variable, reached)
        }
        (None, Some(end)) => {
            let reached = match walker.reachable(&end, &path, true) {
                Ok(reached) => reached,
                Err(error) => return Box::new(once(Err(error.into()))),
            };
            bind_each(seed, subject_variable, reached)
        }
        (None, None) => {
            let starts = match walker.nodes() {
                Ok(starts) => starts,
                Err(error) => return Box::new(once(Err(error.into()))),
            };
            Box::new(starts.into_iter().flat_map(move |start| -> SolutionIter {
                let reached = match walker.reachable(&start, &path, false) {
                    Ok(reached) => reached,
                    Err(error) => return Box::new(once(Err(QueryEvaluationError::from(error)))),
                };
                let same_variable = subject_variable == object_variable;
                let seed = match &subject_variable {
                    Some(variable) => seed.with(variable.clone(), start.clone()),
                    None => seed.clone(),
                };
                if same_variable {
                    return if reached.contains(&start) {
                        Box::new(once(Ok(seed)))
                    } else {
                        Box::new(empty())
                    };
                }
                bind_each(seed, object_variable.clone(), reached)
            }))
        }
    })
}

fn bind_each(seed: Bindings, variable: Option<Variable>, terms: Vec<Term>) -> SolutionIter {
    let Some(variable) = variable else {
        return Box::new(empty());
    };
    Box::new(
        terms
            .into_iter()
            .map(move |term| Ok(seed.with(variable.clone(), term))),
    )
}

struct PathWalker {
    dataset: Arc<DatasetView>,
    graph: ActiveGraph,
}

impl PathWalker {
    /// The nodes reachable from `start`. With `reverse`, the path is followed backwards.
    ///
    /// Every node is returned once, in the order in which it was reached.
    fn reachable(
        &self,
        start: &Term,
        path: &PropertyPathExpression,
        reverse: bool,
    ) -> Result<Vec<Term>, StorageError> {
        match path {
            PropertyPathExpression::NamedNode(predicate) => {
                let triples = if reverse {
                    self.triples(None, Some(predicate), Some(start.as_ref()))?
                } else {
                    let Some(subject) = as_subject(start) else {
                        return Ok(Vec::new());
                    };
                    self.triples(Some(subject), Some(predicate), None)?
                };
                Ok(ends(triples, reverse))
            }
            PropertyPathExpression::Reverse(inner) => self.reachable(start, inner, !reverse),
            PropertyPathExpression::Sequence(first, second) => {
                let (first, second) = if reverse {
                    (second, first)
                } else {
                    (first, second)
                };
                let mut reached = Vec::new();
                for middle in self.reachable(start, first, reverse)? {
                    reached.extend(self.reachable(&middle, second, reverse)?);
                }
                Ok(deduplicate(reached))
            }
            PropertyPathExpression::Alternative(left, right) => {
                let mut reached = self.reachable(start, left, reverse)?;
                reached.extend(self.reachable(start, right, reverse)?);
                Ok(deduplicate(reached))
            }
            PropertyPathExpression::ZeroOrMore(inner) => {
                self.closure(vec![start.clone()], inner, reverse)
            }
            PropertyPathExpression::OneOrMore(inner) => {
                let first = self.reachable(start, inner, reverse)?;
                self.closure(first, inner, reverse)
            }
            PropertyPathExpression::ZeroOrOne(inner) => {
                let mut reached = vec![start.clone()];
                reached.extend(self.reachable(start, inner, reverse)?);
                Ok(deduplicate(reached))
            }
            PropertyPathExpression::NegatedPropertySet(excluded) => {
                let triples = if reverse {
                    self.triples(None, None, Some(start.as_ref()))?
                } else {
                    let Some(subject) = as_subject(start) else {
                        return Ok(Vec::new());
                    };
                    self.triples(Some(subject), None, None)?
                };
                let triples = triples
                    .into_iter()
                    .filter(|triple| !excluded.contains(&triple.predicate))
                    .collect();
                Ok(ends(triples, reverse))
            }
        }
    }

    /// The nodes reachable from `starts` by following `step` any number of times, including the
    /// start nodes themselves.
    fn closure(
        &self,
        starts: Vec<Term>,
        step: &PropertyPathExpression,
        reverse: bool,
    ) -> Result<Vec<Term>, StorageError> {
        let mut visited = FxHashSet::default();
        let mut reached = Vec::new();
        let mut queue = VecDeque::new();
        for start in starts {
            if visited.insert(start.clone()) {
                reached.push(start.clone());
                queue.push_back(start);
            }
        }
        while let Some(current) = queue.pop_front() {
            for next in self.reachable(&current, step, reverse)? {
                if visited.insert(next.clone()) {
                    reached.push(next.clone());
                    queue.push_back(next);
                }
            }
        }
        Ok(reached)
    }

    /// All subjects and objects of the active graph.
    fn nodes(&self) -> Result<Vec<Term>, StorageError> {
        let mut nodes = Vec::new();
        for triple in self.triples(None, None, None)? {
            nodes.push(triple.subject.into());
            nodes.push(triple.object);
        }
        Ok(deduplicate(nodes))
    }

    fn triples(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<&NamedNode>,
        object: Option<TermRef<'_>>,
    ) -> Result<Vec<Triple>, StorageError> {
        self.dataset.triples_for_pattern(
            &self.graph,
            subject,
            predicate.map(NamedNode::as_ref),
            object,
        )
    }
}

fn as_subject(term: &Term) -> Option<SubjectRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        Term::Literal(_) => None,
    }
}

fn ends(triples: Vec<Triple>, reverse: bool) -> Vec<Term> {
    let ends = triples
        .into_iter()
        .map(|triple| {
            if reverse {
                triple.subject.into()
            } else {
                triple.object
            }
        })
        .collect();
    deduplicate(ends)
}

fn deduplicate(terms: Vec<Term>) -> Vec<Term> {
    let mut seen = FxHashSet::default();
    terms
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
