use crate::results::{QueryResults, QuerySolution, QuerySolutionStream};
use crate::sparql::dataset::DatasetView;
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::evaluator::{SimpleEvaluator, SolutionIter};
use crate::sparql::{Bindings, QueryOptions};
use rdf_loom_common::QuadPatternEvaluator;
use rdf_loom_functions::dispatch::FunctionContext;
use rdf_loom_logical::algebra::{NamedNodePattern, TermPattern, TriplePattern};
use rdf_loom_logical::{apply_rewriters, Query, QueryForm};
use rdf_loom_model::{BlankNode, DateTime, Graph, Iri, Subject, Term, Triple, Variable};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Evaluates a prepared query.
///
/// `seed` binds variables before the evaluation starts. It constrains the whole query, and its
/// bindings are part of every solution. `base_iri` overrides the base IRI of the query.
///
/// `SELECT` solutions are computed lazily while the returned [QuerySolutionStream] is consumed.
/// `ASK`, `CONSTRUCT` and `DESCRIBE` are evaluated eagerly.
pub fn evaluate_query(
    query: &Query,
    storage: Arc<dyn QuadPatternEvaluator>,
    seed: Bindings,
    base_iri: Option<&str>,
    options: &QueryOptions,
) -> Result<QueryResults, QueryEvaluationError> {
    tracing::debug!(form = form_name(&query.form), "Evaluating SPARQL query");
    let query = apply_rewriters(query.clone(), options.rewriters());
    let base_iri = match base_iri {
        Some(base_iri) => Some(Iri::parse(base_iri.to_owned())?),
        None => query.base_iri.clone(),
    };
    let dataset = DatasetView::new(
        storage,
        query.dataset.as_ref(),
        options.default_graph_as_union(),
    );
    let evaluator = SimpleEvaluator::new(
        dataset,
        FunctionContext::new(base_iri, DateTime::now()),
        options.custom_functions().clone(),
    );
    let solutions = evaluator.evaluate_pattern(&query.pattern, seed.with_outer());

    match &query.form {
        QueryForm::Select { variables } => {
            let mut variables = variables.clone();
            for (variable, _) in seed.iter() {
                if !variables.contains(variable) {
                    variables.push(variable.clone());
                }
            }
            Ok(QueryResults::Solutions(solution_stream(
                variables.into(),
                solutions,
            )))
        }
        QueryForm::Ask => {
            let mut solutions = solutions;
            match solutions.next() {
                Some(Ok(_)) => Ok(QueryResults::Boolean(true)),
                Some(Err(error)) => Err(error),
                None => Ok(QueryResults::Boolean(false)),
            }
        }
        QueryForm::Construct { template } => {
            let mut graph = Graph::new();
            for solution in solutions {
                let solution = solution?;
                let mut blank_nodes = FxHashMap::default();
                for pattern in template {
                    if let Some(triple) = instantiate(pattern, &solution, &mut blank_nodes) {
                        graph.insert(&triple);
                    }
                }
            }
            Ok(QueryResults::Graph(graph))
        }
        QueryForm::Describe { targets } => {
            let mut resources = Vec::new();
            for solution in solutions {
                let solution = solution?;
                for target in targets {
                    let resource = match target {
                        NamedNodePattern::NamedNode(node) => Some(Subject::from(node.clone())),
                        NamedNodePattern::Variable(variable) => match solution.lookup(variable) {
                            Some(Term::NamedNode(node)) => Some(node.clone().into()),
                            Some(Term::BlankNode(node)) => Some(node.clone().into()),
                            _ => None,
                        },
                    };
                    if let Some(resource) = resource {
                        if !resources.contains(&resource) {
                            resources.push(resource);
                        }
                    }
                }
            }
            describe(&evaluator, &resources)
        }
    }
}

fn solution_stream(variables: Arc<[Variable]>, solutions: SolutionIter) -> QuerySolutionStream {
    let projection = Arc::clone(&variables);
    QuerySolutionStream::new(
        variables,
        solutions.map(move |solution| {
            let solution = solution?;
            let values = projection
                .iter()
                .map(|variable| solution.lookup(variable).cloned())
                .collect::<Vec<_>>();
            Ok(QuerySolution::from((Arc::clone(&projection), values)))
        }),
    )
}

/// Instantiates a template triple. Triples that would be ill-formed (e.g., with an unbound
/// variable or a literal subject) are skipped.
///
/// Blank nodes of the template are replaced with fresh blank nodes for every solution.
fn instantiate(
    pattern: &TriplePattern,
    solution: &Bindings,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> Option<Triple> {
    let subject = match instantiate_term(&pattern.subject, solution, blank_nodes)? {
        Term::NamedNode(node) => Subject::from(node),
        Term::BlankNode(node) => Subject::from(node),
        Term::Literal(_) => return None,
    };
    let predicate = match &pattern.predicate {
        NamedNodePattern::NamedNode(node) => node.clone(),
        NamedNodePattern::Variable(variable) => match solution.lookup(variable)? {
            Term::NamedNode(node) => node.clone(),
            _ => return None,
        },
    };
    let object = instantiate_term(&pattern.object, solution, blank_nodes)?;
    Some(Triple::new(subject, predicate, object))
}

fn instantiate_term(
    pattern: &TermPattern,
    solution: &Bindings,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> Option<Term> {
    match pattern {
        TermPattern::NamedNode(node) => Some(node.clone().into()),
        TermPattern::Literal(literal) => Some(literal.clone().into()),
        TermPattern::BlankNode(node) => Some(
            blank_nodes
                .entry(node.clone())
                .or_insert_with(BlankNode::default)
                .clone()
                .into(),
        ),
        TermPattern::Variable(variable) => solution.lookup(variable).cloned(),
    }
}

/// The triples of the default graph that have one of the resources as subject.
fn describe(
    evaluator: &SimpleEvaluator,
    resources: &[Subject],
) -> Result<QueryResults, QueryEvaluationError> {
    let mut graph = Graph::new();
    for resource in resources {
        for triple in evaluator.triples_with_subject(resource.as_ref())? {
            graph.insert(&triple);
        }
    }
    Ok(QueryResults::Graph(graph))
}

fn form_name(form: &QueryForm) -> &'static str {
    match form {
        QueryForm::Select { .. } => "SELECT",
        QueryForm::Ask => "ASK",
        QueryForm::Construct { .. } => "CONSTRUCT",
        QueryForm::Describe { .. } => "DESCRIBE",
    }
}
