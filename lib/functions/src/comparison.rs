use crate::{ScalarBinaryRdfOp, ScalarBinaryTermOp};
use rdf_loom_model::order::compare_values;
use rdf_loom_model::{Boolean, TermRef, ThinError, ThinResult, TypedValueRef};
use std::cmp::Ordering;

/// The SPARQL `=` operator.
///
/// IRIs and blank nodes are equal iff they are the same term. Literals are compared in their
/// value space. Two literals with unsupported datatypes that are not the same term cannot be
/// compared, which is an error.
#[derive(Debug, Default)]
pub struct EqualRdfOp;

impl EqualRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for EqualRdfOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        values_equal(lhs, rhs).map(Boolean::from)
    }
}

/// Shared by `=`, `!=` and `IN`.
pub fn values_equal(lhs: TypedValueRef<'_>, rhs: TypedValueRef<'_>) -> ThinResult<bool> {
    match (lhs, rhs) {
        (TypedValueRef::NamedNode(lhs), TypedValueRef::NamedNode(rhs)) => Ok(lhs == rhs),
        (TypedValueRef::BlankNode(lhs), TypedValueRef::BlankNode(rhs)) => Ok(lhs == rhs),
        (TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_), _)
        | (_, TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_)) => Ok(false),
        (TypedValueRef::OtherLiteral(lhs), TypedValueRef::OtherLiteral(rhs)) => {
            if lhs == rhs {
                Ok(true)
            } else {
                ThinError::expected()
            }
        }
        (TypedValueRef::OtherLiteral(_), _) | (_, TypedValueRef::OtherLiteral(_)) => {
            ThinError::expected()
        }
        (lhs, rhs) => Ok(compare_values(lhs, rhs) == Some(Ordering::Equal)),
    }
}

/// `sameTerm` works on terms instead of values: `"01"^^xsd:integer` and `"1"^^xsd:integer` are
/// equal, but not the same term.
#[derive(Debug, Default)]
pub struct SameTermRdfOp;

impl SameTermRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryTermOp for SameTermRdfOp {
    type Result = Boolean;

    fn evaluate(&self, lhs: TermRef<'_>, rhs: TermRef<'_>) -> ThinResult<Self::Result> {
        Ok((lhs == rhs).into())
    }
}

/// The comparison operators `<`, `<=`, `>` and `>=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonKind {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

/// An ordering comparison between two values of compatible types.
#[derive(Debug)]
pub struct CompareRdfOp {
    kind: ComparisonKind,
}

impl CompareRdfOp {
    pub fn new(kind: ComparisonKind) -> Self {
        Self { kind }
    }
}

impl ScalarBinaryRdfOp for CompareRdfOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let ordering = compare_values(lhs, rhs).ok_or(ThinError::default())?;
        let result = match self.kind {
            ComparisonKind::Less => ordering == Ordering::Less,
            ComparisonKind::LessOrEqual => ordering != Ordering::Greater,
            ComparisonKind::Greater => ordering == Ordering::Greater,
            ComparisonKind::GreaterOrEqual => ordering != Ordering::Less,
        };
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;
    use rdf_loom_model::{Literal, NamedNode, Term};

    fn value(term: &Term) -> TypedValueRef<'_> {
        TypedValueRef::from(term)
    }

    #[test]
    fn numbers_are_equal_across_types() {
        let one: Term = Literal::new_typed_literal("1", xsd::INTEGER).into();
        let one_double: Term = Literal::new_typed_literal("1.0E0", xsd::DOUBLE).into();
        assert_eq!(values_equal(value(&one), value(&one_double)), Ok(true));
        assert_eq!(
            SameTermRdfOp::new().evaluate(one.as_ref(), one_double.as_ref()),
            Ok(false.into())
        );
    }

    #[test]
    fn unknown_datatypes_cannot_be_compared() {
        let datatype = NamedNode::new_unchecked("http://example.com/dt");
        let a: Term = Literal::new_typed_literal("a", datatype.as_ref()).into();
        let b: Term = Literal::new_typed_literal("b", datatype.as_ref()).into();
        assert_eq!(values_equal(value(&a), value(&a)), Ok(true));
        assert!(values_equal(value(&a), value(&b)).is_err());
    }

    #[test]
    fn iris_are_never_equal_to_literals() {
        let iri: Term = NamedNode::new_unchecked("http://example.com/").into();
        let literal: Term = Literal::new_simple_literal("http://example.com/").into();
        assert_eq!(values_equal(value(&iri), value(&literal)), Ok(false));
    }

    #[test]
    fn ordering_requires_compatible_types() {
        let two: Term = Literal::new_typed_literal("2", xsd::INTEGER).into();
        let text: Term = Literal::new_simple_literal("2").into();
        let op = CompareRdfOp::new(ComparisonKind::Less);
        assert!(op.evaluate(value(&two), value(&text)).is_err());
        assert_eq!(
            CompareRdfOp::new(ComparisonKind::GreaterOrEqual).evaluate(value(&two), value(&two)),
            Ok(true.into())
        );
    }
}
