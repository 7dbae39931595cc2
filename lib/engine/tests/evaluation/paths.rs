use crate::{ex, load, select, values};
use rdf_loom_model::{Literal, Term};
use std::error::Error;

const RING: &str = r#"
@prefix ex: <http://example.com/> .

ex:a ex:next ex:b .
ex:b ex:next ex:c .
ex:c ex:next ex:a ;
    ex:label "c" .
ex:d ex:next ex:e .
"#;

fn reached(query: &str) -> Result<Vec<Option<Term>>, Box<dyn Error>> {
    let storage = load(RING)?;
    Ok(values(&select(&storage, query)?, "x"))
}

#[test]
fn one_or_more_terminates_on_cycles() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:a ex:next+ ?x }")?,
        vec![Some(ex("a")), Some(ex("b")), Some(ex("c"))]
    );
    Ok(())
}

#[test]
fn zero_or_more_includes_the_start() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:d ex:next* ?x }")?,
        vec![Some(ex("d")), Some(ex("e"))]
    );
    Ok(())
}

#[test]
fn zero_or_one() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:a ex:next? ?x }")?,
        vec![Some(ex("a")), Some(ex("b"))]
    );
    Ok(())
}

#[test]
fn closure_with_bound_object() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ?x ex:next+ ex:e }")?,
        vec![Some(ex("d"))]
    );
    Ok(())
}

#[test]
fn closure_with_the_same_variable_on_both_ends() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ?x ex:next+ ?x }")?,
        vec![Some(ex("a")), Some(ex("b")), Some(ex("c"))]
    );
    Ok(())
}

#[test]
fn sequence_and_inverse() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:a ex:next/ex:next ?x }")?,
        vec![Some(ex("c"))]
    );
    assert_eq!(
        reached("SELECT ?x WHERE { ex:a ^ex:next ?x }")?,
        vec![Some(ex("c"))]
    );
    Ok(())
}

#[test]
fn alternative() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:c ex:next|ex:label ?x }")?,
        vec![Some(Literal::new_simple_literal("c").into()), Some(ex("a"))]
    );
    Ok(())
}

#[test]
fn negated_property_set() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:c !ex:next ?x }")?,
        vec![Some(Literal::new_simple_literal("c").into())]
    );
    Ok(())
}

#[test]
fn closure_of_a_sequence() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        reached("SELECT ?x WHERE { ex:a (ex:next/ex:next)+ ?x }")?,
        vec![Some(ex("a")), Some(ex("b")), Some(ex("c"))]
    );
    Ok(())
}
