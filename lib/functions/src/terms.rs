use crate::{ScalarBinaryRdfOp, ScalarNullaryRdfOp, ScalarUnaryRdfOp, ScalarUnaryTermOp};
use rdf_loom_model::vocab::rdf;
use rdf_loom_model::{
    BlankNode, Boolean, Iri, Literal, NamedNode, NamedNodeRef, SimpleLiteral, SimpleLiteralRef,
    TermRef, ThinError, ThinResult, TypedValueRef,
};

/// `STR`: the IRI or the lexical form of a literal.
#[derive(Debug, Default)]
pub struct StrRdfOp;

impl StrRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryTermOp for StrRdfOp {
    type Result = SimpleLiteral;

    fn evaluate(&self, term: TermRef<'_>) -> ThinResult<Self::Result> {
        match term {
            TermRef::NamedNode(node) => Ok(SimpleLiteral::new(node.as_str())),
            TermRef::Literal(literal) => Ok(SimpleLiteral::new(literal.value())),
            TermRef::BlankNode(_) => ThinError::expected(),
        }
    }
}

/// `LANG`: the language tag or the empty string.
#[derive(Debug, Default)]
pub struct LangRdfOp;

impl LangRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryTermOp for LangRdfOp {
    type Result = SimpleLiteral;

    fn evaluate(&self, term: TermRef<'_>) -> ThinResult<Self::Result> {
        match term {
            TermRef::Literal(literal) => {
                Ok(SimpleLiteral::new(literal.language().unwrap_or_default()))
            }
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DatatypeRdfOp;

impl DatatypeRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryTermOp for DatatypeRdfOp {
    type Result = NamedNode;

    fn evaluate(&self, term: TermRef<'_>) -> ThinResult<Self::Result> {
        match term {
            TermRef::Literal(literal) if literal.language().is_some() => {
                Ok(rdf::LANG_STRING.into_owned())
            }
            TermRef::Literal(literal) => Ok(literal.datatype().into_owned()),
            _ => ThinError::expected(),
        }
    }
}

macro_rules! term_test {
    ($(#[$meta:meta])* $name:ident, |$term:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl ScalarUnaryTermOp for $name {
            type Result = Boolean;

            fn evaluate(&self, $term: TermRef<'_>) -> ThinResult<Self::Result> {
                Ok(Boolean::from($body))
            }
        }
    };
}

term_test!(IsIriRdfOp, |term| matches!(term, TermRef::NamedNode(_)));
term_test!(IsBlankRdfOp, |term| matches!(term, TermRef::BlankNode(_)));
term_test!(IsLiteralRdfOp, |term| matches!(term, TermRef::Literal(_)));
term_test!(
    /// `isNumeric` is only true for literals with a numeric datatype and a valid lexical form.
    IsNumericRdfOp,
    |term| matches!(
        TypedValueRef::from(term),
        TypedValueRef::NumericLiteral(_)
    )
);

/// `IRI`/`URI`: resolves a string against the base IRI of the query.
#[derive(Debug, Default)]
pub struct IriRdfOp {
    base_iri: Option<Iri<String>>,
}

impl IriRdfOp {
    pub fn new(base_iri: Option<Iri<String>>) -> Self {
        Self { base_iri }
    }
}

impl ScalarUnaryRdfOp for IriRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = NamedNode;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::NamedNode(node) => Ok(node.into_owned()),
            TypedValueRef::SimpleLiteral(literal) => {
                let iri = match &self.base_iri {
                    Some(base_iri) => base_iri.resolve(literal.value)?,
                    None => Iri::parse(literal.value.to_owned())?,
                };
                Ok(NamedNode::from(iri))
            }
            _ => ThinError::expected(),
        }
    }
}

/// `BNODE()` and `BNODE(str)`. Every call creates a fresh blank node.
#[derive(Debug, Default)]
pub struct BNodeRdfOp;

impl BNodeRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarNullaryRdfOp for BNodeRdfOp {
    type Result = BlankNode;

    fn evaluate(&self) -> ThinResult<Self::Result> {
        Ok(BlankNode::default())
    }
}

impl ScalarUnaryRdfOp for BNodeRdfOp {
    type Arg<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = BlankNode;

    fn evaluate<'data>(&self, _value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        Ok(BlankNode::default())
    }
}

/// `STRDT`: the lexical form is kept as given.
#[derive(Debug, Default)]
pub struct StrDtRdfOp;

impl StrDtRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for StrDtRdfOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = NamedNodeRef<'data>;
    type Result<'data> = Literal;

    fn evaluate<'data>(
        &self,
        lexical: Self::ArgLhs<'data>,
        datatype: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        Ok(Literal::new_typed_literal(lexical.value, datatype))
    }
}

#[derive(Debug, Default)]
pub struct StrLangRdfOp;

impl StrLangRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for StrLangRdfOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Literal;

    fn evaluate<'data>(
        &self,
        lexical: Self::ArgLhs<'data>,
        language: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        Literal::new_language_tagged_literal(lexical.value, language.value)
            .map_err(|_| ThinError::default())
    }
}

/// `UUID()`: a fresh `urn:uuid:` IRI.
#[derive(Debug, Default)]
pub struct UuidRdfOp;

impl UuidRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarNullaryRdfOp for UuidRdfOp {
    type Result = NamedNode;

    fn evaluate(&self) -> ThinResult<Self::Result> {
        let uuid = uuid::Uuid::new_v4();
        Ok(NamedNode::new_unchecked(format!("urn:uuid:{uuid}")))
    }
}

/// `STRUUID()`: a fresh UUID as simple literal.
#[derive(Debug, Default)]
pub struct StrUuidRdfOp;

impl StrUuidRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarNullaryRdfOp for StrUuidRdfOp {
    type Result = SimpleLiteral;

    fn evaluate(&self) -> ThinResult<Self::Result> {
        Ok(SimpleLiteral::new(uuid::Uuid::new_v4().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;

    #[test]
    fn str_keeps_the_lexical_form() {
        let literal = Literal::new_typed_literal("01", xsd::INTEGER);
        assert_eq!(
            StrRdfOp::new().evaluate(literal.as_ref().into()),
            Ok(SimpleLiteral::new("01"))
        );
        let blank = BlankNode::default();
        assert!(StrRdfOp::new().evaluate(blank.as_ref().into()).is_err());
    }

    #[test]
    fn datatype_of_language_strings() {
        let literal = Literal::new_language_tagged_literal_unchecked("chat", "fr");
        assert_eq!(
            DatatypeRdfOp::new().evaluate(literal.as_ref().into()),
            Ok(rdf::LANG_STRING.into_owned())
        );
        assert_eq!(
            LangRdfOp::new().evaluate(literal.as_ref().into()),
            Ok(SimpleLiteral::new("fr"))
        );
    }

    #[test]
    fn is_numeric_requires_a_valid_lexical_form() {
        let valid = Literal::new_typed_literal("12", xsd::INT);
        let invalid = Literal::new_typed_literal("twelve", xsd::INTEGER);
        assert_eq!(
            IsNumericRdfOp::new().evaluate(valid.as_ref().into()),
            Ok(true.into())
        );
        assert_eq!(
            IsNumericRdfOp::new().evaluate(invalid.as_ref().into()),
            Ok(false.into())
        );
    }

    #[test]
    fn iri_resolves_against_the_base() {
        let op = IriRdfOp::new(Some(Iri::parse("http://example.com/dir/".to_owned()).unwrap()));
        let result = op
            .evaluate(TypedValueRef::SimpleLiteral(SimpleLiteralRef::new("file")))
            .unwrap();
        assert_eq!(result.as_str(), "http://example.com/dir/file");

        let without_base = IriRdfOp::new(None);
        assert!(without_base
            .evaluate(TypedValueRef::SimpleLiteral(SimpleLiteralRef::new("relative")))
            .is_err());
    }

    #[test]
    fn uuids_are_fresh() {
        let a = UuidRdfOp::new().evaluate().unwrap();
        let b = UuidRdfOp::new().evaluate().unwrap();
        assert!(a.as_str().starts_with("urn:uuid:"));
        assert_ne!(a, b);
    }
}
