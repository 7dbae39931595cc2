use crate::{evaluate, ex, load, select, values, PEOPLE};
use std::error::Error;

#[test]
fn unmatched_pattern_has_no_solutions() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let mut results = evaluate(&storage, "SELECT * WHERE { ?s ex:missing ?o }")?;
    assert_eq!(results.len()?, 0);
    Ok(())
}

#[test]
fn optional_keeps_every_left_solution() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let left = select(&storage, "SELECT * WHERE { ?s ex:name ?n }")?;
    let joined = select(
        &storage,
        "SELECT * WHERE { ?s ex:name ?n OPTIONAL { ?s ex:age ?a } }",
    )?;
    assert!(joined.len() >= left.len());
    assert_eq!(joined.len(), 3);
    let unbound = joined
        .iter()
        .filter(|solution| solution.get("a").is_none())
        .count();
    assert_eq!(unbound, 1);
    Ok(())
}

#[test]
fn optional_filter_is_evaluated_with_both_sides() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT * WHERE { ?s ex:name ?n OPTIONAL { ?s ex:age ?a FILTER(?a > 26) } }",
    )?;
    assert_eq!(solutions.len(), 3);
    let with_age = solutions
        .iter()
        .filter(|solution| solution.get("a").is_some())
        .count();
    assert_eq!(with_age, 1);
    Ok(())
}

#[test]
fn minus_never_adds_solutions() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let left = select(&storage, "SELECT * WHERE { ?s ex:name ?n }")?;
    let minus = select(
        &storage,
        "SELECT * WHERE { ?s ex:name ?n MINUS { ?s ex:age ?a } }",
    )?;
    assert!(minus.len() <= left.len());
    assert_eq!(values(&minus, "s"), vec![Some(ex("carol"))]);
    Ok(())
}

#[test]
fn minus_with_disjoint_variables_removes_nothing() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let minus = select(
        &storage,
        "SELECT * WHERE { ?s ex:name ?n MINUS { ?x ex:age ?a } }",
    )?;
    assert_eq!(minus.len(), 3);
    Ok(())
}

#[test]
fn exists_and_not_exists_partition_the_input() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let all = select(&storage, "SELECT ?s WHERE { ?s ex:name ?n }")?;
    let exists = select(
        &storage,
        "SELECT ?s WHERE { ?s ex:name ?n FILTER EXISTS { ?s ex:knows ?o } }",
    )?;
    let not_exists = select(
        &storage,
        "SELECT ?s WHERE { ?s ex:name ?n FILTER NOT EXISTS { ?s ex:knows ?o } }",
    )?;

    assert_eq!(exists.len() + not_exists.len(), all.len());
    assert_eq!(
        values(&exists, "s"),
        vec![Some(ex("alice")), Some(ex("bob"))]
    );
    assert_eq!(values(&not_exists, "s"), vec![Some(ex("carol"))]);
    Ok(())
}

#[test]
fn exists_does_not_bind_variables() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT * WHERE { ?s ex:name ?n FILTER EXISTS { ?s ex:knows ?o } }",
    )?;
    assert!(solutions.iter().all(|solution| solution.get("o").is_none()));
    Ok(())
}

#[test]
fn group_has_one_solution_per_distinct_key() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let grouped = select(
        &storage,
        "SELECT ?team WHERE { ?s ex:team ?team } GROUP BY ?team",
    )?;
    let distinct = select(
        &storage,
        "SELECT DISTINCT ?team WHERE { ?s ex:team ?team }",
    )?;
    assert_eq!(grouped.len(), distinct.len());
    assert_eq!(values(&grouped, "team"), values(&distinct, "team"));
    Ok(())
}
