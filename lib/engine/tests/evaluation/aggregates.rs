use crate::{ex, load, select, PEOPLE};
use rdf_loom_model::{Literal, Term};
use std::error::Error;

#[test]
fn count_per_group() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?team (COUNT(*) AS ?members) WHERE { ?s ex:team ?team }
         GROUP BY ?team ORDER BY ?team",
    )?;
    let rows = solutions
        .iter()
        .map(|solution| (solution.get("team").cloned(), solution.get("members").cloned()))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            (Some(ex("blue")), Some(Literal::from(2).into())),
            (Some(ex("red")), Some(Literal::from(2).into())),
        ]
    );
    Ok(())
}

#[test]
fn aggregates_without_group_by() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT (SUM(?a) AS ?sum) (MIN(?a) AS ?min) (MAX(?a) AS ?max) WHERE { ?s ex:age ?a }",
    )?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("sum"), Some(&Literal::from(96).into()));
    assert_eq!(solutions[0].get("min"), Some(&Literal::from(25).into()));
    assert_eq!(solutions[0].get("max"), Some(&Literal::from(41).into()));
    Ok(())
}

#[test]
fn count_over_empty_input_is_zero() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT (COUNT(*) AS ?count) WHERE { ?s ex:missing ?o }",
    )?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("count"), Some(&Literal::from(0).into()));
    Ok(())
}

#[test]
fn group_by_over_empty_input_has_no_groups() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?o (COUNT(*) AS ?count) WHERE { ?s ex:missing ?o } GROUP BY ?o",
    )?;
    assert!(solutions.is_empty());
    Ok(())
}

#[test]
fn having_filters_groups() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s (COUNT(?o) AS ?friends) WHERE { ?s ex:knows ?o }
         GROUP BY ?s HAVING (COUNT(?o) > 1)",
    )?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get("s"), Some(&ex("alice")));
    assert_eq!(solutions[0].get("friends"), Some(&Literal::from(2).into()));
    Ok(())
}

#[test]
fn count_distinct() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT (COUNT(DISTINCT ?o) AS ?known) WHERE { ?s ex:knows ?o }",
    )?;
    assert_eq!(solutions[0].get("known"), Some(&Literal::from(2).into()));
    Ok(())
}

#[test]
fn unbound_inputs_are_left_out_of_an_aggregate() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        r#"SELECT ?team (GROUP_CONCAT(DISTINCT STR(?a); separator="|") AS ?ages)
           WHERE { ?s ex:team ?team OPTIONAL { ?s ex:age ?a } }
           GROUP BY ?team ORDER BY ?team"#,
    )?;
    let ages = solutions
        .iter()
        .map(|solution| match solution.get("ages") {
            Some(Term::Literal(ages)) => {
                let mut ages = ages.value().split('|').map(str::to_owned).collect::<Vec<_>>();
                ages.sort();
                Some(ages)
            }
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        ages,
        vec![
            Some(vec!["41".to_owned()]),
            Some(vec!["25".to_owned(), "30".to_owned()]),
        ]
    );
    Ok(())
}

#[test]
fn count_of_an_expression_skips_unbound_inputs() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT (COUNT(STR(?a)) AS ?count) WHERE { ?s ex:team ?team OPTIONAL { ?s ex:age ?a } }",
    )?;
    assert_eq!(solutions[0].get("count"), Some(&Literal::from(3).into()));
    Ok(())
}
