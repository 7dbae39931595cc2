#![allow(clippy::panic_in_result_fn)]

mod aggregates;
mod dataset;
mod expressions;
mod forms;
mod paths;
mod properties;
mod scenarios;

use oxttl::TriGParser;
use rdf_loom_common::{QuadPatternEvaluator, QuadStorage};
use rdf_loom_engine::sparql::{evaluate_query, prepare_query, Bindings, QueryOptions};
use rdf_loom_engine::{QueryResults, QuerySolution};
use rdf_loom_logical::Namespaces;
use rdf_loom_model::{NamedNode, Term};
use rdf_loom_storage::memory::MemQuadStorage;
use std::error::Error;
use std::sync::Arc;

const PEOPLE: &str = r#"
@prefix ex: <http://example.com/> .

ex:alice ex:name "Alice" ;
    ex:age 30 ;
    ex:knows ex:bob , ex:carol ;
    ex:team ex:red .
ex:bob ex:name "Bob" ;
    ex:age 25 ;
    ex:knows ex:carol ;
    ex:team ex:red .
ex:carol ex:name "Carol" ;
    ex:team ex:blue .
ex:dave ex:age 41 ;
    ex:team ex:blue .

ex:g1 {
    ex:alice ex:email "alice@example.com" .
}

ex:g2 {
    ex:bob ex:email "bob@example.com" .
    ex:erin ex:name "Erin" .
}
"#;

fn load(trig: &str) -> Result<Arc<MemQuadStorage>, Box<dyn Error>> {
    let quads = TriGParser::new()
        .for_slice(trig.as_bytes())
        .collect::<Result<Vec<_>, _>>()?;
    let storage = MemQuadStorage::new();
    storage.extend(quads)?;
    Ok(Arc::new(storage))
}

fn namespaces() -> Namespaces {
    let mut namespaces = Namespaces::new();
    namespaces.insert("ex", "http://example.com/");
    namespaces.insert("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
    namespaces.insert("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
    namespaces.insert("xsd", "http://www.w3.org/2001/XMLSchema#");
    namespaces
}

fn ex(local: &str) -> Term {
    NamedNode::new_unchecked(format!("http://example.com/{local}")).into()
}

fn evaluate_with(
    storage: &Arc<MemQuadStorage>,
    query: &str,
    seed: Bindings,
    options: &QueryOptions,
) -> Result<QueryResults, Box<dyn Error>> {
    let query = prepare_query(query, &namespaces(), None)?;
    Ok(evaluate_query(
        &query,
        Arc::clone(storage) as Arc<dyn QuadPatternEvaluator>,
        seed,
        None,
        options,
    )?)
}

fn evaluate(storage: &Arc<MemQuadStorage>, query: &str) -> Result<QueryResults, Box<dyn Error>> {
    evaluate_with(storage, query, Bindings::new(), &QueryOptions::default())
}

fn select(
    storage: &Arc<MemQuadStorage>,
    query: &str,
) -> Result<Vec<QuerySolution>, Box<dyn Error>> {
    solutions(evaluate(storage, query)?)
}

fn solutions(results: QueryResults) -> Result<Vec<QuerySolution>, Box<dyn Error>> {
    match results {
        QueryResults::Solutions(solutions) => Ok(solutions.collect::<Result<Vec<_>, _>>()?),
        _ => Err("expected solutions".into()),
    }
}

/// The values of `variable` in all solutions, sorted by their string form.
fn values(solutions: &[QuerySolution], variable: &str) -> Vec<Option<Term>> {
    let mut values = solutions
        .iter()
        .map(|solution| solution.get(variable).cloned())
        .collect::<Vec<_>>();
    values.sort_by_key(|value| value.as_ref().map(Term::to_string));
    values
}
