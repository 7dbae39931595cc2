use crate::test_utils::translate_update_request;
use std::error::Error;

#[test]
fn insert_data() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request(r#"INSERT DATA { ex:a ex:p "x" }"#)?;
    insta::assert_snapshot!(update, @r#"(update (insertData ((triple <http://example.com/a> <http://example.com/p> "x"))))"#);
    Ok(())
}

#[test]
fn delete_data_rejects_blank_nodes() {
    let result = translate_update_request(r#"DELETE DATA { _:b ex:p "x" }"#);
    assert!(result.is_err());
}

#[test]
fn delete_where_uses_template_as_pattern() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request("DELETE WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(update, @"(update (modify (delete (triple ?s <http://example.com/p> ?o)) (bgp (triple ?s <http://example.com/p> ?o))))");
    Ok(())
}

#[test]
fn with_sets_template_graph_and_dataset() -> Result<(), Box<dyn Error>> {
    let update =
        translate_update_request("WITH ex:g DELETE { ?s ex:p ?o } WHERE { ?s ex:p ?o }")?;
    insta::assert_snapshot!(update, @"(update (modify (delete (graph <http://example.com/g> (triple ?s <http://example.com/p> ?o))) (using (dataset <http://example.com/g>)) (bgp (triple ?s <http://example.com/p> ?o))))");
    Ok(())
}

#[test]
fn copy_is_desugared() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request("COPY ex:g TO ex:h")?;
    insta::assert_snapshot!(update, @"(update (drop silent <http://example.com/h>) (modify (insert (graph <http://example.com/h> (triple ?s ?p ?o))) (graph <http://example.com/g> (bgp (triple ?s ?p ?o)))))");
    Ok(())
}

#[test]
fn move_drops_the_source() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request("MOVE ex:g TO DEFAULT")?;
    insta::assert_snapshot!(update, @"(update (drop silent default) (modify (insert (triple ?s ?p ?o)) (graph <http://example.com/g> (bgp (triple ?s ?p ?o)))) (drop silent <http://example.com/g>))");
    Ok(())
}

#[test]
fn add_to_same_graph_does_nothing() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request("ADD DEFAULT TO DEFAULT")?;
    assert!(update.operations.is_empty());
    Ok(())
}

#[test]
fn prologues_apply_to_later_operations() -> Result<(), Box<dyn Error>> {
    let update = translate_update_request(
        "PREFIX ex: <http://other.org/> CLEAR GRAPH ex:g ; CREATE SILENT GRAPH ex:h",
    )?;
    insta::assert_snapshot!(update, @"(update (clear <http://other.org/g>) (create silent <http://other.org/h>))");
    Ok(())
}
