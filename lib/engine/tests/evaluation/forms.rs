use crate::{evaluate, ex, load, select, values, PEOPLE};
use rdf_loom_engine::QueryResults;
use rdf_loom_model::{Graph, Literal, NamedNode, Term};
use std::error::Error;

fn graph(results: QueryResults) -> Result<Graph, Box<dyn Error>> {
    match results {
        QueryResults::Graph(graph) => Ok(graph),
        _ => Err("expected a graph".into()),
    }
}

#[test]
fn ask() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    assert!(matches!(
        evaluate(&storage, "ASK { ex:alice ex:knows ex:bob }")?,
        QueryResults::Boolean(true)
    ));
    assert!(matches!(
        evaluate(&storage, "ASK { ex:carol ex:knows ?someone }")?,
        QueryResults::Boolean(false)
    ));
    let mut results = evaluate(&storage, "ASK { }")?;
    assert_eq!(results.len()?, 1);
    Ok(())
}

#[test]
fn construct_uses_fresh_blank_nodes_per_solution() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let graph = graph(evaluate(
        &storage,
        "CONSTRUCT { ?s ex:friendship _:f . _:f ex:with ?o } WHERE { ?s ex:knows ?o }",
    )?)?;
    assert_eq!(graph.len(), 6);
    let friendship = NamedNode::new("http://example.com/friendship")?;
    let blank_nodes = graph
        .triples_for_predicate(&friendship)
        .map(|triple| triple.object.into_owned())
        .collect::<Vec<_>>();
    assert_eq!(blank_nodes.len(), 3);
    assert!(blank_nodes
        .iter()
        .all(|node| matches!(node, Term::BlankNode(_))));
    Ok(())
}

#[test]
fn construct_skips_unbound_variables() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let graph = graph(evaluate(
        &storage,
        "CONSTRUCT { ?s ex:age ?a } WHERE { ?s ex:name ?n OPTIONAL { ?s ex:age ?a } }",
    )?)?;
    assert_eq!(graph.len(), 2);
    Ok(())
}

#[test]
fn construct_where() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let graph = graph(evaluate(&storage, "CONSTRUCT WHERE { ?s ex:team ex:red }")?)?;
    assert_eq!(graph.len(), 2);
    Ok(())
}

#[test]
fn describe_returns_the_triples_of_a_resource() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let graph = graph(evaluate(&storage, "DESCRIBE ex:alice")?)?;
    assert_eq!(graph.len(), 5);
    Ok(())
}

#[test]
fn describe_with_a_variable() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let graph = graph(evaluate(
        &storage,
        "DESCRIBE ?s WHERE { ?s ex:team ex:red }",
    )?)?;
    // alice has five triples, bob four
    assert_eq!(graph.len(), 9);
    Ok(())
}

#[test]
fn distinct_and_reduced() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let all = select(&storage, "SELECT ?team WHERE { ?s ex:team ?team }")?;
    let distinct = select(&storage, "SELECT DISTINCT ?team WHERE { ?s ex:team ?team }")?;
    let reduced = select(&storage, "SELECT REDUCED ?team WHERE { ?s ex:team ?team }")?;
    assert_eq!(all.len(), 4);
    assert_eq!(
        values(&distinct, "team"),
        vec![Some(ex("blue")), Some(ex("red"))]
    );
    assert!(reduced.len() >= distinct.len() && reduced.len() <= all.len());
    Ok(())
}

#[test]
fn values_constrain_the_pattern() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?a WHERE { VALUES ?s { ex:alice ex:dave ex:nobody } ?s ex:age ?a }",
    )?;
    assert_eq!(
        values(&solutions, "s"),
        vec![Some(ex("alice")), Some(ex("dave"))]
    );
    Ok(())
}

#[test]
fn trailing_values_with_undef() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?team WHERE { ?s ex:team ?team }
         VALUES (?s ?team) { (ex:alice UNDEF) (UNDEF ex:blue) }",
    )?;
    assert_eq!(
        values(&solutions, "s"),
        vec![Some(ex("alice")), Some(ex("carol")), Some(ex("dave"))]
    );
    Ok(())
}

#[test]
fn union_keeps_both_branches() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s WHERE { { ?s ex:team ex:red } UNION { ?s ex:team ex:blue } }",
    )?;
    assert_eq!(solutions.len(), 4);
    Ok(())
}

#[test]
fn sub_select_projects_its_variables() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?n WHERE {
            { SELECT ?s WHERE { ?s ex:age ?n } }
            ?s ex:name ?n
        }",
    )?;
    assert_eq!(
        values(&solutions, "s"),
        vec![Some(ex("alice")), Some(ex("bob"))]
    );
    Ok(())
}

#[test]
fn select_in_solution_order() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?age WHERE { ?s ex:age ?age } ORDER BY DESC(?age)",
    )?;
    let rendered = solutions
        .iter()
        .map(|solution| {
            solution
                .iter()
                .map(|(variable, term)| format!("{variable}={term}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r#"
    ?s=<http://example.com/dave> ?age="41"^^<http://www.w3.org/2001/XMLSchema#integer>
    ?s=<http://example.com/alice> ?age="30"^^<http://www.w3.org/2001/XMLSchema#integer>
    ?s=<http://example.com/bob> ?age="25"^^<http://www.w3.org/2001/XMLSchema#integer>
    "#);
    Ok(())
}

#[test]
fn sliced_sub_select_is_evaluated_once_for_a_join() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s WHERE {
            ?s ex:name ?n
            { SELECT ?s WHERE { ?s ex:age ?a } ORDER BY ?a LIMIT 1 }
        }",
    )?;
    assert_eq!(values(&solutions, "s"), vec![Some(ex("bob"))]);
    Ok(())
}

#[test]
fn sliced_sub_select_is_evaluated_once_for_an_optional() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let solutions = select(
        &storage,
        "SELECT ?s ?a WHERE {
            ?s ex:name ?n
            OPTIONAL { SELECT ?s ?a WHERE { ?s ex:age ?a } ORDER BY ?a OFFSET 1 }
        }",
    )?;
    assert_eq!(solutions.len(), 3);
    let ages = solutions
        .iter()
        .map(|solution| (solution.get("s").cloned(), solution.get("a").cloned()))
        .filter(|(_, age)| age.is_some())
        .collect::<Vec<_>>();
    assert_eq!(ages, vec![(Some(ex("alice")), Some(Literal::from(30).into()))]);
    Ok(())
}
