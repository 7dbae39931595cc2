use crate::{evaluate, evaluate_with, ex, load, namespaces, select, solutions, values, PEOPLE};
use rdf_loom_common::QuadPatternEvaluator;
use rdf_loom_engine::sparql::{evaluate_query, prepare_query, Bindings, QueryOptions};
use rdf_loom_engine::QueryResults;
use rdf_loom_logical::ValuesFirstRewriter;
use rdf_loom_model::vocab::xsd;
use rdf_loom_model::{DateTime, Literal, Term, Variable};
use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;

const RDFS: &str = r#"
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

rdfs:Resource a rdfs:Class ;
    rdfs:label "Resource" .
rdfs:Class a rdfs:Class ;
    rdfs:label "Class" ;
    rdfs:comment "The class of classes." ;
    rdfs:subClassOf rdfs:Resource .
rdfs:Literal a rdfs:Class ;
    rdfs:label "Literal" ;
    rdfs:subClassOf rdfs:Resource .
rdfs:Datatype a rdfs:Class ;
    rdfs:comment "The class of RDF datatypes." ;
    rdfs:subClassOf rdfs:Class .
rdf:Property a rdfs:Class ;
    rdfs:subClassOf rdfs:Resource .
rdfs:Container a rdfs:Class ;
    rdfs:comment "The class of RDF containers." .
"#;

#[test]
fn rdfs_classes_with_label_and_comment() -> Result<(), Box<dyn Error>> {
    let storage = load(RDFS)?;
    let results = evaluate(
        &storage,
        "SELECT ?class ?superClass ?label ?comment WHERE {
            ?class rdf:type rdfs:Class .
            ?class rdfs:label ?label .
            ?class rdfs:comment ?comment .
            ?class rdfs:subClassOf ?superClass .
        }",
    )?;
    let QueryResults::Solutions(solutions) = results else {
        return Err("expected solutions".into());
    };
    let variables = ["class", "superClass", "label", "comment"]
        .into_iter()
        .map(Variable::new_unchecked)
        .collect::<Vec<_>>();
    assert_eq!(solutions.variables(), variables.as_slice());

    let solutions = solutions.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get("label"),
        Some(&Literal::new_simple_literal("Class").into())
    );
    Ok(())
}

#[test]
fn concat_in_bind() -> Result<(), Box<dyn Error>> {
    let storage = load("")?;
    let solutions = select(
        &storage,
        r#"SELECT ?o WHERE { BIND(CONCAT("a", " + ", "b") AS ?o) }"#,
    )?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get("o"),
        Some(&Literal::new_simple_literal("a + b").into())
    );
    Ok(())
}

#[test]
fn date_time_plus_year_month_duration() -> Result<(), Box<dyn Error>> {
    let storage = load("")?;
    let solutions = select(
        &storage,
        r#"SELECT ?d WHERE {
            BIND("2019-05-28T12:14:45Z"^^xsd:dateTime + "P1Y"^^xsd:yearMonthDuration AS ?d)
        }"#,
    )?;
    assert_eq!(solutions.len(), 1);
    let Some(Term::Literal(literal)) = solutions[0].get("d") else {
        return Err("?d is not bound to a literal".into());
    };
    assert_eq!(literal.datatype(), xsd::DATE_TIME);
    assert_eq!(
        DateTime::from_str(literal.value())?,
        DateTime::from_str("2020-05-28T12:14:45+00:00")?
    );
    Ok(())
}

#[test]
fn prepared_query_can_be_evaluated_twice() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let query = prepare_query(
        "SELECT ?s ?o WHERE { ?s ex:knows ?o }",
        &namespaces(),
        None,
    )?;

    let first = solutions(evaluate_query(
        &query,
        Arc::clone(&storage) as Arc<dyn QuadPatternEvaluator>,
        Bindings::new(),
        None,
        &QueryOptions::default(),
    )?)?;
    let second = solutions(evaluate_query(
        &query,
        Arc::clone(&storage) as Arc<dyn QuadPatternEvaluator>,
        Bindings::new(),
        None,
        &QueryOptions::default(),
    )?)?;

    assert_eq!(first.len(), 3);
    assert_eq!(values(&first, "s"), values(&second, "s"));
    assert_eq!(values(&first, "o"), values(&second, "o"));
    Ok(())
}

#[test]
fn values_first_keeps_the_scope_of_a_filtered_group() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let query = "SELECT * WHERE { { ?s ex:age ?a FILTER(?x = 1) } VALUES ?x { 1 } }";
    let plain = solutions(evaluate(&storage, query)?)?;
    let options = QueryOptions::default().with_rewriter(ValuesFirstRewriter::new());
    let rewritten = solutions(evaluate_with(&storage, query, Bindings::new(), &options)?)?;
    assert!(plain.is_empty());
    assert!(rewritten.is_empty());
    Ok(())
}

#[test]
fn values_first_matches_the_plain_evaluation() -> Result<(), Box<dyn Error>> {
    let storage = load(PEOPLE)?;
    let query = "SELECT ?s ?a WHERE { ?s ex:age ?a VALUES ?a { 25 41 } }";
    let plain = solutions(evaluate(&storage, query)?)?;
    let options = QueryOptions::default().with_rewriter(ValuesFirstRewriter::new());
    let rewritten = solutions(evaluate_with(&storage, query, Bindings::new(), &options)?)?;
    assert_eq!(values(&plain, "s"), values(&rewritten, "s"));
    assert_eq!(values(&rewritten, "s"), vec![Some(ex("bob")), Some(ex("dave"))]);
    Ok(())
}
