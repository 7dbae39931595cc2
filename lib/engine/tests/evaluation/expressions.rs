use crate::{ex, evaluate_with, load, select, solutions, values, PEOPLE};
use rdf_loom_engine::sparql::{Bindings, QueryOptions};
use rdf_loom_model::{Literal, NamedNode, Term};
use std::error::Error;

#[test]
fn filter_on_numeric_comparison() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(&storage, "SELECT ?s WHERE { ?s ex:age ?a FILTER(?a > 26) }")?;
    assert_eq!(
        values(&solutions, "s"),
        vec![Some(ex("alice")), Some(ex("dave"))]
    );
    Ok(())
}

#[test]
fn filter_error_drops_the_solution() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(&storage, "SELECT ?s WHERE { ?s ex:name ?n FILTER(?n > 3) }")?;
    assert!(solutions.is_empty());
    Ok(())
}

#[test]
fn bind_error_leaves_the_variable_unbound() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?l WHERE { ?s ex:name ?n BIND(?n + 1 AS ?l) }",
    )?;
    assert_eq!(solutions.len(), 3);
    assert!(solutions.iter().all(|solution| solution.get("l").is_none()));
    Ok(())
}

#[test]
fn in_and_not_in() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let included = select(
        &storage,
        r#"SELECT ?s WHERE { ?s ex:name ?n FILTER(?n IN ("Alice", "Carol")) }"#,
    )?;
    let excluded = select(
        &storage,
        r#"SELECT ?s WHERE { ?s ex:name ?n FILTER(?n NOT IN ("Alice", "Carol")) }"#,
    )?;
    assert_eq!(
        values(&included, "s"),
        vec![Some(ex("alice")), Some(ex("carol"))]
    );
    assert_eq!(values(&excluded, "s"), vec![Some(ex("bob"))]);
    Ok(())
}

#[test]
fn coalesce_and_if() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        r#"SELECT ?s ?v WHERE {
            ?s ex:name ?n
            OPTIONAL { ?s ex:age ?a }
            BIND(IF(BOUND(?a), ?a, COALESCE(?missing, "unknown")) AS ?v)
        }"#,
    )?;
    let unknown = solutions
        .iter()
        .filter(|solution| {
            solution.get("v") == Some(&Literal::new_simple_literal("unknown").into())
        })
        .count();
    assert_eq!(solutions.len(), 3);
    assert_eq!(unknown, 1);
    Ok(())
}

#[test]
fn order_by_with_limit_and_offset() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let oldest = select(
        &storage,
        "SELECT ?s WHERE { ?s ex:age ?a } ORDER BY DESC(?a) LIMIT 2",
    )?;
    let oldest = oldest
        .iter()
        .map(|solution| solution.get("s").cloned())
        .collect::<Vec<_>>();
    assert_eq!(oldest, vec![Some(ex("dave")), Some(ex("alice"))]);

    let second = select(
        &storage,
        "SELECT ?s WHERE { ?s ex:age ?a } ORDER BY ?a OFFSET 1 LIMIT 1",
    )?;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].get("s"), Some(&ex("alice")));
    Ok(())
}

#[test]
fn now_is_constant_within_one_evaluation() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?now WHERE { ?s ex:name ?n BIND(NOW() AS ?now) }",
    )?;
    assert_eq!(solutions.len(), 3);
    let first = solutions[0].get("now");
    assert!(first.is_some());
    assert!(solutions.iter().all(|solution| solution.get("now") == first));
    Ok(())
}

#[test]
fn custom_function() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let options = QueryOptions::default().with_custom_function(
        NamedNode::new("http://example.com/double")?,
        |args: &[Term]| match args {
            [Term::Literal(value)] => {
                let value = value.value().parse::<i64>().ok()?;
                Some(Literal::from(value * 2).into())
            }
            _ => None,
        },
    );
    let results = evaluate_with(
        &storage,
        "SELECT ?d WHERE { ex:dave ex:age ?a BIND(ex:double(?a) AS ?d) }",
        Bindings::new(),
        &options,
    )?;
    let solutions = solutions(results)?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("d"), Some(&Literal::from(82).into()));
    Ok(())
}

#[test]
fn unknown_function_is_an_expression_error() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?d WHERE { ?s ex:age ?a BIND(ex:unknown(?a) AS ?d) }",
    )?;
    assert_eq!(solutions.len(), 3);
    assert!(solutions.iter().all(|solution| solution.get("d").is_none()));
    Ok(())
}
