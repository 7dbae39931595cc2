use rdf_loom_functions::dispatch::{evaluate_builtin, FunctionContext};
use rdf_loom_functions::BuiltinName;
use rdf_loom_model::vocab::xsd;
use rdf_loom_model::{DateTime, Iri, Literal, NamedNode, Term, TermRef};
use std::str::FromStr;

fn context() -> FunctionContext {
    FunctionContext::new(
        Some(Iri::parse("http://example.com/base/".to_owned()).unwrap()),
        DateTime::from_str("2024-01-01T00:00:00Z").unwrap(),
    )
}

fn call(name: &str, args: &[Term]) -> Option<Term> {
    let builtin = BuiltinName::from_keyword(name).unwrap();
    let args = args.iter().map(Term::as_ref).collect::<Vec<TermRef<'_>>>();
    evaluate_builtin(builtin, &args, &context()).ok()
}

fn string(value: &str) -> Term {
    Literal::new_simple_literal(value).into()
}

fn integer(value: i64) -> Term {
    Literal::new_typed_literal(value.to_string(), xsd::INTEGER).into()
}

#[test]
fn concat_of_plain_strings() {
    assert_eq!(
        call("CONCAT", &[string("a"), string(" + "), string("b")]),
        Some(string("a + b"))
    );
}

#[test]
fn wrong_arity_is_an_error() {
    assert_eq!(call("STRLEN", &[]), None);
    assert_eq!(call("STRLEN", &[string("a"), string("b")]), None);
}

#[test]
fn type_errors_are_errors() {
    assert_eq!(call("UCASE", &[integer(1)]), None);
    assert_eq!(call("ABS", &[string("1")]), None);
}

#[test]
fn substr_has_optional_length() {
    assert_eq!(
        call("SUBSTR", &[string("foobar"), integer(4)]),
        Some(string("bar"))
    );
    assert_eq!(
        call("SUBSTR", &[string("foobar"), integer(2), integer(2)]),
        Some(string("oo"))
    );
}

#[test]
fn now_is_fixed_per_context() {
    let now = call("NOW", &[]).unwrap();
    assert_eq!(
        now,
        Literal::new_typed_literal("2024-01-01T00:00:00Z", xsd::DATE_TIME).into()
    );
    assert_eq!(call("NOW", &[]), Some(now));
}

#[test]
fn iri_uses_the_base() {
    assert_eq!(
        call("IRI", &[string("x")]),
        Some(NamedNode::new_unchecked("http://example.com/base/x").into())
    );
}

#[test]
fn regex_with_flags() {
    let yes: Term = Literal::from(true).into();
    assert_eq!(
        call("REGEX", &[string("Alice"), string("^ali"), string("i")]),
        Some(yes)
    );
}

#[test]
fn casts_use_the_datatype_iri() {
    let builtin = BuiltinName::from_cast_iri(xsd::INTEGER).unwrap();
    let arg = string("42");
    let result = evaluate_builtin(builtin, &[arg.as_ref()], &context());
    assert_eq!(result, Ok(integer(42)));
}

#[test]
fn bnode_is_fresh() {
    let a = call("BNODE", &[string("x")]).unwrap();
    let b = call("BNODE", &[string("x")]).unwrap();
    assert!(matches!(a, Term::BlankNode(_)));
    assert_ne!(a, b);
}
