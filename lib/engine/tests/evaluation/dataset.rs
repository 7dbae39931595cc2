use crate::{evaluate_with, ex, load, select, solutions, values, PEOPLE};
use rdf_loom_engine::sparql::{Bindings, QueryOptions};
use rdf_loom_engine::QueryResults;
use rdf_loom_model::{Literal, Variable};
use std::error::Error;

#[test]
fn default_graph_excludes_named_graphs() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(&storage, "SELECT ?e WHERE { ?s ex:email ?e }")?;
    assert!(solutions.is_empty());
    Ok(())
}

#[test]
fn default_graph_as_union() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let results = evaluate_with(
        &storage,
        "SELECT ?e WHERE { ?s ex:email ?e }",
        Bindings::new(),
        &QueryOptions::default().with_default_graph_as_union(),
    )?;
    assert_eq!(solutions(results)?.len(), 2);
    Ok(())
}

#[test]
fn from_merges_graphs_into_the_default_graph() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let one = select(&storage, "SELECT ?e FROM ex:g1 WHERE { ?s ex:email ?e }")?;
    assert_eq!(
        values(&one, "e"),
        vec![Some(Literal::new_simple_literal("alice@example.com").into())]
    );
    let both = select(
        &storage,
        "SELECT ?e FROM ex:g1 FROM ex:g2 WHERE { ?s ex:email ?e }",
    )?;
    assert_eq!(both.len(), 2);
    Ok(())
}

#[test]
fn graph_variable_enumerates_named_graphs() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(&storage, "SELECT ?g WHERE { GRAPH ?g { ?s ex:email ?e } }")?;
    assert_eq!(values(&solutions, "g"), vec![Some(ex("g1")), Some(ex("g2"))]);
    Ok(())
}

#[test]
fn from_named_restricts_graph_patterns() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?g ?s FROM NAMED ex:g2 WHERE { GRAPH ?g { ?s ex:email ?e } }",
    )?;
    assert_eq!(values(&solutions, "s"), vec![Some(ex("bob"))]);
    let hidden = select(
        &storage,
        "SELECT ?s FROM NAMED ex:g2 WHERE { GRAPH ex:g1 { ?s ex:email ?e } }",
    )?;
    assert!(hidden.is_empty());
    Ok(())
}

#[test]
fn initial_bindings_constrain_the_query() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let seed = Bindings::new().with(Variable::new("s")?, ex("bob"));
    let results = evaluate_with(
        &storage,
        "SELECT ?n WHERE { ?s ex:name ?n }",
        seed,
        &QueryOptions::default(),
    )?;
    let QueryResults::Solutions(solutions) = results else {
        return Err("expected solutions".into());
    };
    assert_eq!(
        solutions.variables(),
        &[Variable::new("n")?, Variable::new("s")?]
    );
    let solutions = solutions.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get("n"),
        Some(&Literal::new_simple_literal("Bob").into())
    );
    assert_eq!(solutions[0].get("s"), Some(&ex("bob")));
    Ok(())
}
