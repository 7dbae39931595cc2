use crate::{
    is_integer_datatype, is_numeric_datatype, Boolean, Date, DateTime, DayTimeDuration, Decimal,
    Double, Duration, Float, Integer, LanguageString, LanguageStringRef, Numeric,
    OwnedStringLiteral, SimpleLiteral, SimpleLiteralRef, ThinError, ThinResult, Time,
    YearMonthDuration,
};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Term, TermRef,
};
use std::str::FromStr;

/// The value-space view of an RDF term.
///
/// Literals with a supported datatype are parsed into their value. Literals with an unknown
/// datatype or an invalid lexical form are kept as [TypedValue::OtherLiteral].
#[derive(Clone, PartialEq, Debug)]
pub enum TypedValue {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    BooleanLiteral(Boolean),
    NumericLiteral(Numeric),
    SimpleLiteral(SimpleLiteral),
    LanguageStringLiteral(LanguageString),
    DateTimeLiteral(DateTime),
    TimeLiteral(Time),
    DateLiteral(Date),
    DurationLiteral(Duration),
    YearMonthDurationLiteral(YearMonthDuration),
    DayTimeDurationLiteral(DayTimeDuration),
    OtherLiteral(Literal),
}

impl TypedValue {
    pub fn as_ref(&self) -> TypedValueRef<'_> {
        match self {
            TypedValue::NamedNode(inner) => TypedValueRef::NamedNode(inner.as_ref()),
            TypedValue::BlankNode(inner) => TypedValueRef::BlankNode(inner.as_ref()),
            TypedValue::BooleanLiteral(inner) => TypedValueRef::BooleanLiteral(*inner),
            TypedValue::NumericLiteral(inner) => TypedValueRef::NumericLiteral(*inner),
            TypedValue::SimpleLiteral(inner) => TypedValueRef::SimpleLiteral(inner.as_ref()),
            TypedValue::LanguageStringLiteral(inner) => {
                TypedValueRef::LanguageStringLiteral(inner.as_ref())
            }
            TypedValue::DateTimeLiteral(inner) => TypedValueRef::DateTimeLiteral(*inner),
            TypedValue::TimeLiteral(inner) => TypedValueRef::TimeLiteral(*inner),
            TypedValue::DateLiteral(inner) => TypedValueRef::DateLiteral(*inner),
            TypedValue::DurationLiteral(inner) => TypedValueRef::DurationLiteral(*inner),
            TypedValue::YearMonthDurationLiteral(inner) => {
                TypedValueRef::YearMonthDurationLiteral(*inner)
            }
            TypedValue::DayTimeDurationLiteral(inner) => {
                TypedValueRef::DayTimeDurationLiteral(*inner)
            }
            TypedValue::OtherLiteral(inner) => TypedValueRef::OtherLiteral(inner.as_ref()),
        }
    }

    /// Returns the term with the canonical lexical form of this value.
    pub fn into_term(self) -> Term {
        match self {
            TypedValue::NamedNode(inner) => inner.into(),
            TypedValue::BlankNode(inner) => inner.into(),
            TypedValue::SimpleLiteral(inner) => Literal::new_simple_literal(inner.value).into(),
            TypedValue::LanguageStringLiteral(inner) => {
                Literal::new_language_tagged_literal_unchecked(inner.value, inner.language).into()
            }
            TypedValue::OtherLiteral(inner) => inner.into(),
            other => other.as_ref().into_term(),
        }
    }
}

impl From<Term> for TypedValue {
    fn from(value: Term) -> Self {
        TypedValueRef::from(value.as_ref()).into_owned()
    }
}

impl From<TypedValue> for Term {
    fn from(value: TypedValue) -> Self {
        value.into_term()
    }
}

macro_rules! impl_owned_from {
    ($TYPE: ty, $VARIANT: path) => {
        impl From<$TYPE> for TypedValue {
            fn from(value: $TYPE) -> Self {
                $VARIANT(value)
            }
        }
    };
}

impl_owned_from!(NamedNode, TypedValue::NamedNode);
impl_owned_from!(BlankNode, TypedValue::BlankNode);
impl_owned_from!(Boolean, TypedValue::BooleanLiteral);
impl_owned_from!(Numeric, TypedValue::NumericLiteral);
impl_owned_from!(SimpleLiteral, TypedValue::SimpleLiteral);
impl_owned_from!(LanguageString, TypedValue::LanguageStringLiteral);
impl_owned_from!(DateTime, TypedValue::DateTimeLiteral);
impl_owned_from!(Time, TypedValue::TimeLiteral);
impl_owned_from!(Date, TypedValue::DateLiteral);
impl_owned_from!(Duration, TypedValue::DurationLiteral);
impl_owned_from!(YearMonthDuration, TypedValue::YearMonthDurationLiteral);
impl_owned_from!(DayTimeDuration, TypedValue::DayTimeDurationLiteral);

impl From<Integer> for TypedValue {
    fn from(value: Integer) -> Self {
        TypedValue::NumericLiteral(Numeric::Integer(value))
    }
}

impl From<Decimal> for TypedValue {
    fn from(value: Decimal) -> Self {
        TypedValue::NumericLiteral(Numeric::Decimal(value))
    }
}

impl From<Float> for TypedValue {
    fn from(value: Float) -> Self {
        TypedValue::NumericLiteral(Numeric::Float(value))
    }
}

impl From<Double> for TypedValue {
    fn from(value: Double) -> Self {
        TypedValue::NumericLiteral(Numeric::Double(value))
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::BooleanLiteral(value.into())
    }
}

impl From<OwnedStringLiteral> for TypedValue {
    fn from(value: OwnedStringLiteral) -> Self {
        match value.1 {
            None => TypedValue::SimpleLiteral(SimpleLiteral { value: value.0 }),
            Some(language) => TypedValue::LanguageStringLiteral(LanguageString {
                value: value.0,
                language,
            }),
        }
    }
}

impl From<Literal> for TypedValue {
    fn from(value: Literal) -> Self {
        TypedValueRef::from_literal(value.as_ref()).into_owned()
    }
}

impl From<TypedValueRef<'_>> for TypedValue {
    fn from(value: TypedValueRef<'_>) -> Self {
        value.into_owned()
    }
}

/// A borrowed [TypedValue].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TypedValueRef<'value> {
    NamedNode(NamedNodeRef<'value>),
    BlankNode(BlankNodeRef<'value>),
    BooleanLiteral(Boolean),
    NumericLiteral(Numeric),
    SimpleLiteral(SimpleLiteralRef<'value>),
    LanguageStringLiteral(LanguageStringRef<'value>),
    DateTimeLiteral(DateTime),
    TimeLiteral(Time),
    DateLiteral(Date),
    DurationLiteral(Duration),
    YearMonthDurationLiteral(YearMonthDuration),
    DayTimeDurationLiteral(DayTimeDuration),
    OtherLiteral(LiteralRef<'value>),
}

impl<'value> TypedValueRef<'value> {
    /// Maps a literal into the value space of its datatype.
    pub fn from_literal(literal: LiteralRef<'value>) -> Self {
        let value = literal.value();
        if let Some(language) = literal.language() {
            return TypedValueRef::LanguageStringLiteral(LanguageStringRef { value, language });
        }

        let datatype = literal.datatype();
        let parsed = if datatype == xsd::STRING {
            Some(TypedValueRef::SimpleLiteral(SimpleLiteralRef::new(value)))
        } else if datatype == xsd::BOOLEAN {
            Boolean::from_str(value)
                .ok()
                .map(TypedValueRef::BooleanLiteral)
        } else if is_integer_datatype(datatype) {
            Integer::from_str(value)
                .ok()
                .map(|v| TypedValueRef::NumericLiteral(Numeric::Integer(v)))
        } else if datatype == xsd::DECIMAL {
            Decimal::from_str(value)
                .ok()
                .map(|v| TypedValueRef::NumericLiteral(Numeric::Decimal(v)))
        } else if datatype == xsd::FLOAT {
            Float::from_str(value)
                .ok()
                .map(|v| TypedValueRef::NumericLiteral(Numeric::Float(v)))
        } else if datatype == xsd::DOUBLE {
            Double::from_str(value)
                .ok()
                .map(|v| TypedValueRef::NumericLiteral(Numeric::Double(v)))
        } else if datatype == xsd::DATE_TIME {
            DateTime::from_str(value)
                .ok()
                .map(TypedValueRef::DateTimeLiteral)
        } else if datatype == xsd::DATE {
            Date::from_str(value).ok().map(TypedValueRef::DateLiteral)
        } else if datatype == xsd::TIME {
            Time::from_str(value).ok().map(TypedValueRef::TimeLiteral)
        } else if datatype == xsd::DURATION {
            Duration::from_str(value)
                .ok()
                .map(TypedValueRef::DurationLiteral)
        } else if datatype == xsd::YEAR_MONTH_DURATION {
            YearMonthDuration::from_str(value)
                .ok()
                .map(TypedValueRef::YearMonthDurationLiteral)
        } else if datatype == xsd::DAY_TIME_DURATION {
            DayTimeDuration::from_str(value)
                .ok()
                .map(TypedValueRef::DayTimeDurationLiteral)
        } else {
            None
        };
        parsed.unwrap_or(TypedValueRef::OtherLiteral(literal))
    }

    /// Returns the datatype of the value. Named nodes and blank nodes have no datatype.
    pub fn datatype(&self) -> ThinResult<NamedNodeRef<'value>> {
        Ok(match self {
            TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) => {
                return ThinError::expected()
            }
            TypedValueRef::BooleanLiteral(_) => xsd::BOOLEAN,
            TypedValueRef::NumericLiteral(value) => value.datatype(),
            TypedValueRef::SimpleLiteral(_) => xsd::STRING,
            TypedValueRef::LanguageStringLiteral(_) => rdf::LANG_STRING,
            TypedValueRef::DateTimeLiteral(_) => xsd::DATE_TIME,
            TypedValueRef::TimeLiteral(_) => xsd::TIME,
            TypedValueRef::DateLiteral(_) => xsd::DATE,
            TypedValueRef::DurationLiteral(_) => xsd::DURATION,
            TypedValueRef::YearMonthDurationLiteral(_) => xsd::YEAR_MONTH_DURATION,
            TypedValueRef::DayTimeDurationLiteral(_) => xsd::DAY_TIME_DURATION,
            TypedValueRef::OtherLiteral(literal) => literal.datatype(),
        })
    }

    /// Computes the [effective boolean value](https://www.w3.org/TR/sparql11-query/#ebv).
    pub fn effective_boolean_value(&self) -> ThinResult<bool> {
        match self {
            TypedValueRef::BooleanLiteral(value) => Ok(bool::from(*value)),
            TypedValueRef::NumericLiteral(value) => Ok(!value.is_zero_or_nan()),
            TypedValueRef::SimpleLiteral(value) => Ok(!value.is_empty()),
            // Invalid lexical forms of booleans and numbers have an EBV of false.
            TypedValueRef::OtherLiteral(literal)
                if literal.datatype() == xsd::BOOLEAN || is_numeric_datatype(literal.datatype()) =>
            {
                Ok(false)
            }
            _ => ThinError::expected(),
        }
    }

    /// Returns an owned term with the canonical lexical form of this value.
    pub fn into_term(self) -> Term {
        match self {
            TypedValueRef::NamedNode(value) => Term::NamedNode(value.into_owned()),
            TypedValueRef::BlankNode(value) => Term::BlankNode(value.into_owned()),
            TypedValueRef::BooleanLiteral(value) => Term::Literal(Literal::from(bool::from(value))),
            TypedValueRef::NumericLiteral(value) => Term::Literal(Literal::from(value)),
            TypedValueRef::SimpleLiteral(value) => {
                Term::Literal(Literal::new_simple_literal(value.value))
            }
            TypedValueRef::LanguageStringLiteral(value) => Term::Literal(
                Literal::new_language_tagged_literal_unchecked(value.value, value.language),
            ),
            TypedValueRef::DateTimeLiteral(value) => Term::Literal(Literal::new_typed_literal(
                value.to_string(),
                xsd::DATE_TIME,
            )),
            TypedValueRef::TimeLiteral(value) => {
                Term::Literal(Literal::new_typed_literal(value.to_string(), xsd::TIME))
            }
            TypedValueRef::DateLiteral(value) => {
                Term::Literal(Literal::new_typed_literal(value.to_string(), xsd::DATE))
            }
            TypedValueRef::DurationLiteral(value) => {
                Term::Literal(Literal::new_typed_literal(value.to_string(), xsd::DURATION))
            }
            TypedValueRef::YearMonthDurationLiteral(value) => Term::Literal(
                Literal::new_typed_literal(value.to_string(), xsd::YEAR_MONTH_DURATION),
            ),
            TypedValueRef::DayTimeDurationLiteral(value) => Term::Literal(
                Literal::new_typed_literal(value.to_string(), xsd::DAY_TIME_DURATION),
            ),
            TypedValueRef::OtherLiteral(value) => Term::Literal(value.into_owned()),
        }
    }

    pub fn into_owned(self) -> TypedValue {
        match self {
            TypedValueRef::NamedNode(inner) => TypedValue::NamedNode(inner.into_owned()),
            TypedValueRef::BlankNode(inner) => TypedValue::BlankNode(inner.into_owned()),
            TypedValueRef::BooleanLiteral(inner) => TypedValue::BooleanLiteral(inner),
            TypedValueRef::NumericLiteral(inner) => TypedValue::NumericLiteral(inner),
            TypedValueRef::SimpleLiteral(inner) => TypedValue::SimpleLiteral(inner.into_owned()),
            TypedValueRef::LanguageStringLiteral(inner) => {
                TypedValue::LanguageStringLiteral(inner.into_owned())
            }
            TypedValueRef::DateTimeLiteral(inner) => TypedValue::DateTimeLiteral(inner),
            TypedValueRef::TimeLiteral(inner) => TypedValue::TimeLiteral(inner),
            TypedValueRef::DateLiteral(inner) => TypedValue::DateLiteral(inner),
            TypedValueRef::DurationLiteral(inner) => TypedValue::DurationLiteral(inner),
            TypedValueRef::YearMonthDurationLiteral(inner) => {
                TypedValue::YearMonthDurationLiteral(inner)
            }
            TypedValueRef::DayTimeDurationLiteral(inner) => {
                TypedValue::DayTimeDurationLiteral(inner)
            }
            TypedValueRef::OtherLiteral(inner) => TypedValue::OtherLiteral(inner.into_owned()),
        }
    }
}

impl<'value> From<TermRef<'value>> for TypedValueRef<'value> {
    fn from(term: TermRef<'value>) -> Self {
        match term {
            TermRef::NamedNode(node) => TypedValueRef::NamedNode(node),
            TermRef::BlankNode(node) => TypedValueRef::BlankNode(node),
            TermRef::Literal(literal) => TypedValueRef::from_literal(literal),
        }
    }
}

impl<'value> From<&'value Term> for TypedValueRef<'value> {
    fn from(term: &'value Term) -> Self {
        term.as_ref().into()
    }
}

macro_rules! impl_from {
    ($TYPE: ty, $VARIANT: path) => {
        impl<'data> From<$TYPE> for TypedValueRef<'data> {
            fn from(value: $TYPE) -> Self {
                $VARIANT(value)
            }
        }
    };
}

impl_from!(Boolean, TypedValueRef::BooleanLiteral);
impl_from!(Numeric, TypedValueRef::NumericLiteral);
impl_from!(SimpleLiteralRef<'data>, TypedValueRef::SimpleLiteral);
impl_from!(
    LanguageStringRef<'data>,
    TypedValueRef::LanguageStringLiteral
);
impl_from!(LiteralRef<'data>, TypedValueRef::OtherLiteral);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_mapped_to_their_value_space() {
        let literal = Literal::new_typed_literal("01", xsd::INT);
        let value = TypedValueRef::from(TermRef::from(literal.as_ref()));
        assert_eq!(
            value,
            TypedValueRef::NumericLiteral(Numeric::Integer(Integer::from(1)))
        );

        let literal = Literal::new_language_tagged_literal_unchecked("chat", "fr");
        assert_eq!(
            TypedValueRef::from_literal(literal.as_ref()),
            TypedValueRef::LanguageStringLiteral(LanguageStringRef {
                value: "chat",
                language: "fr"
            })
        );
    }

    #[test]
    fn ill_typed_literals_are_kept() {
        let literal = Literal::new_typed_literal("abc", xsd::INTEGER);
        assert_eq!(
            TypedValueRef::from_literal(literal.as_ref()),
            TypedValueRef::OtherLiteral(literal.as_ref())
        );
        assert_eq!(
            TypedValueRef::from_literal(literal.as_ref()).effective_boolean_value(),
            Ok(false)
        );
    }

    #[test]
    fn canonical_lexical_form() {
        let literal = Literal::new_typed_literal("01", xsd::INTEGER);
        let term = TypedValueRef::from_literal(literal.as_ref()).into_term();
        assert_eq!(term, Literal::new_typed_literal("1", xsd::INTEGER).into());
    }

    #[test]
    fn effective_boolean_value() {
        let empty = Literal::new_simple_literal("");
        let text = Literal::new_simple_literal("text");
        let zero = Literal::new_typed_literal("0.0", xsd::DOUBLE);
        let iri = NamedNode::new_unchecked("http://example.com/");

        assert_eq!(
            TypedValueRef::from_literal(empty.as_ref()).effective_boolean_value(),
            Ok(false)
        );
        assert_eq!(
            TypedValueRef::from_literal(text.as_ref()).effective_boolean_value(),
            Ok(true)
        );
        assert_eq!(
            TypedValueRef::from_literal(zero.as_ref()).effective_boolean_value(),
            Ok(false)
        );
        assert!(TypedValueRef::NamedNode(iri.as_ref())
            .effective_boolean_value()
            .is_err());
    }
}
