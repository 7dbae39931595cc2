use crate::test_utils::namespaces;
use rdf_loom_logical::{translate_query, TranslationError};
use rdf_loom_parser::parse_query;
use std::error::Error;

fn translation_error(source: &str) -> Result<TranslationError, Box<dyn Error>> {
    let ast = parse_query(source)?;
    match translate_query(&ast, source, &namespaces(), None) {
        Ok(query) => Err(format!("expected an error, got {query}").into()),
        Err(error) => Ok(error),
    }
}

#[test]
fn undeclared_prefix() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT * WHERE { ?s foo:p ?o }")?;
    let TranslationError::UndeclaredPrefix { prefix, span } = &error else {
        panic!("unexpected error {error}");
    };
    assert_eq!(prefix, "foo");
    assert_eq!(span.start, 20);
    insta::assert_snapshot!(error, @"The prefix 'foo:' is not declared");
    Ok(())
}

#[test]
fn bind_of_bound_variable() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT * WHERE { ?s ex:p ?o BIND(1 AS ?o) }")?;
    assert!(
        matches!(&error, TranslationError::VariableAlreadyBound { variable, .. } if variable == "o"),
        "unexpected error {error}"
    );
    Ok(())
}

#[test]
fn select_expression_of_bound_variable() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT (1 AS ?o) WHERE { ?s ex:p ?o }")?;
    assert!(
        matches!(&error, TranslationError::VariableAlreadyBound { variable, .. } if variable == "o"),
        "unexpected error {error}"
    );
    Ok(())
}

#[test]
fn ungrouped_variable_in_projection() -> Result<(), Box<dyn Error>> {
    let error =
        translation_error("SELECT ?o (COUNT(?s) AS ?c) WHERE { ?s ex:p ?o } GROUP BY ?s")?;
    assert!(
        matches!(&error, TranslationError::UngroupedVariable { variable, .. } if variable == "o"),
        "unexpected error {error}"
    );
    Ok(())
}

#[test]
fn wildcard_with_group_by() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT * WHERE { ?s ex:p ?o } GROUP BY ?s")?;
    assert!(
        matches!(error, TranslationError::WildcardWithGroupBy { .. }),
        "unexpected error {error}"
    );
    Ok(())
}

#[test]
fn aggregate_in_filter() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT * WHERE { ?s ex:p ?o FILTER(COUNT(?o) > 1) }")?;
    assert!(
        matches!(error, TranslationError::MisplacedAggregate { .. }),
        "unexpected error {error}"
    );
    Ok(())
}

#[test]
fn nested_aggregate() -> Result<(), Box<dyn Error>> {
    let error = translation_error("SELECT (SUM(COUNT(?o)) AS ?c) WHERE { ?s ex:p ?o }")?;
    assert!(
        matches!(error, TranslationError::MisplacedAggregate { .. }),
        "unexpected error {error}"
    );
    Ok(())
}
