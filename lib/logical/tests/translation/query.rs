use crate::test_utils::translate;
use rdf_loom_logical::QueryForm;
use rdf_loom_model::Variable;
use std::error::Error;

#[test]
fn basic_graph_pattern() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT ?s WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(project (?s) (bgp (triple ?s <http://example.com/p> ?o)))");
    Ok(())
}

#[test]
fn prefix_declaration_overrides_initial_namespace() -> Result<(), Box<dyn Error>> {
    let query = translate("PREFIX ex: <http://other.org/> SELECT * WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(project (?s ?o) (bgp (triple ?s <http://other.org/p> ?o)))");
    Ok(())
}

#[test]
fn relative_iris_are_resolved_against_base() -> Result<(), Box<dyn Error>> {
    let query = translate("BASE <http://example.com/base/> SELECT * WHERE { ?s <p> ?o }")?;
    insta::assert_snapshot!(query, @"(base <http://example.com/base/> (project (?s ?o) (bgp (triple ?s <http://example.com/base/p> ?o))))");
    Ok(())
}

#[test]
fn blank_nodes_are_not_returned_by_select_star() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { _:b ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(project (?o) (bgp (triple ?bnode.0 <http://example.com/p> ?o)))");
    assert_eq!(query.variables(), [Variable::new_unchecked("o")]);
    Ok(())
}

#[test]
fn optional_filter_becomes_left_join_expression() -> Result<(), Box<dyn Error>> {
    let query = translate(
        "SELECT * WHERE { ?s ex:p ?o OPTIONAL { ?s ex:q ?v FILTER(?v > 1) } }",
    )?;
    insta::assert_snapshot!(query, @r#"(project (?s ?o ?v) (leftjoin (bgp (triple ?s <http://example.com/p> ?o)) (bgp (triple ?s <http://example.com/q> ?v)) (> ?v "1"^^<http://www.w3.org/2001/XMLSchema#integer>)))"#);
    Ok(())
}

#[test]
fn sequence_path_introduces_hidden_variable() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { ?s ex:p/ex:q ?o }")?;
    insta::assert_snapshot!(query, @"(project (?s ?o) (bgp (triple ?s <http://example.com/p> ?path.0) (triple ?path.0 <http://example.com/q> ?o)))");
    Ok(())
}

#[test]
fn alternative_path_becomes_union() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { ?s ex:p|ex:q ?o }")?;
    insta::assert_snapshot!(query, @"(project (?s ?o) (union (bgp (triple ?s <http://example.com/p> ?o)) (bgp (triple ?s <http://example.com/q> ?o))))");
    Ok(())
}

#[test]
fn inverse_path_swaps_subject_and_object() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { ?s ^ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(project (?o ?s) (bgp (triple ?o <http://example.com/p> ?s)))");
    Ok(())
}

#[test]
fn closure_path_is_kept() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { ?s ex:p* ?o }")?;
    insta::assert_snapshot!(query, @"(project (?s ?o) (path ?s (path* <http://example.com/p>) ?o))");
    Ok(())
}

#[test]
fn bind_extends_the_group() -> Result<(), Box<dyn Error>> {
    let query = translate(r#"SELECT ?o WHERE { BIND(CONCAT("a", " + ", "b") AS ?o) }"#)?;
    insta::assert_snapshot!(query, @r#"(project (?o) (extend ((?o (concat "a" " + " "b"))) (table (vars) (row))))"#);
    Ok(())
}

#[test]
fn aggregates_are_replaced_by_variables() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT ?s (COUNT(?o) AS ?c) WHERE { ?s ex:p ?o } GROUP BY ?s")?;
    insta::assert_snapshot!(query, @"(project (?s ?c) (extend ((?c ?agg.0)) (group (?s) ((?agg.0 (count ?o))) (bgp (triple ?s <http://example.com/p> ?o)))))");
    Ok(())
}

#[test]
fn count_star_counts_solutions() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT (COUNT(*) AS ?c) WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(project (?c) (extend ((?c ?agg.0)) (group () ((?agg.0 (count))) (bgp (triple ?s <http://example.com/p> ?o)))))");
    Ok(())
}

#[test]
fn solution_modifiers_are_applied_in_order() -> Result<(), Box<dyn Error>> {
    let query = translate(
        "SELECT DISTINCT ?s WHERE { ?s ex:p ?o } ORDER BY DESC(?o) LIMIT 10 OFFSET 5",
    )?;
    insta::assert_snapshot!(query, @"(slice 5 10 (distinct (project (?s) (order ((desc ?o)) (bgp (triple ?s <http://example.com/p> ?o))))))");
    Ok(())
}

#[test]
fn sub_select_is_wrapped() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { { SELECT ?s WHERE { ?s ex:p ?o } } }")?;
    insta::assert_snapshot!(query, @"(project (?s) (tomultiset (project (?s) (bgp (triple ?s <http://example.com/p> ?o)))))");
    Ok(())
}

#[test]
fn not_exists_filter() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { ?s ex:p ?o FILTER NOT EXISTS { ?o ex:q ?s } }")?;
    insta::assert_snapshot!(query, @"(project (?s ?o) (filter (! (exists (bgp (triple ?o <http://example.com/q> ?s)))) (bgp (triple ?s <http://example.com/p> ?o))))");
    Ok(())
}

#[test]
fn values_clause_binds_rows() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * WHERE { VALUES ?x { ex:a UNDEF } }")?;
    insta::assert_snapshot!(query, @"(project (?x) (table (vars ?x) (row [?x <http://example.com/a>]) (row)))");
    Ok(())
}

#[test]
fn ask_query() -> Result<(), Box<dyn Error>> {
    let query = translate("ASK { ?s ex:p ?o }")?;
    assert_eq!(query.form, QueryForm::Ask);
    insta::assert_snapshot!(query, @"(ask (bgp (triple ?s <http://example.com/p> ?o)))");
    Ok(())
}

#[test]
fn construct_query() -> Result<(), Box<dyn Error>> {
    let query = translate("CONSTRUCT { ?s ex:q ?o } WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(construct ((triple ?s <http://example.com/q> ?o)) (bgp (triple ?s <http://example.com/p> ?o)))");
    Ok(())
}

#[test]
fn construct_where_uses_pattern_as_template() -> Result<(), Box<dyn Error>> {
    let query = translate("CONSTRUCT WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(construct ((triple ?s <http://example.com/p> ?o)) (bgp (triple ?s <http://example.com/p> ?o)))");
    Ok(())
}

#[test]
fn describe_query() -> Result<(), Box<dyn Error>> {
    let query = translate("DESCRIBE ex:a")?;
    insta::assert_snapshot!(query, @"(describe (<http://example.com/a>) (table (vars) (row)))");
    Ok(())
}

#[test]
fn dataset_clause() -> Result<(), Box<dyn Error>> {
    let query = translate("SELECT * FROM ex:g WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(query, @"(from (dataset <http://example.com/g>) (project (?s ?o) (bgp (triple ?s <http://example.com/p> ?o))))");
    Ok(())
}
