//! The XSD constructor functions (`xsd:integer(?x)` etc.).
//!
//! Casting from a string parses its lexical form. Casting to a string uses the canonical
//! representation of the value.

use crate::ScalarUnaryRdfOp;
use rdf_loom_model::{
    Boolean, DateTime, Decimal, Double, Float, Integer, Numeric, SimpleLiteral, ThinError,
    ThinResult, TypedValueRef,
};
use std::str::FromStr;

#[derive(Debug, Default)]
pub struct CastStringRdfOp;

impl CastStringRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastStringRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = SimpleLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        let lexical = match value {
            TypedValueRef::NamedNode(value) => value.as_str().to_owned(),
            TypedValueRef::BlankNode(_) => return ThinError::expected(),
            TypedValueRef::BooleanLiteral(value) => value.to_string(),
            TypedValueRef::NumericLiteral(value) => value.format_value(),
            TypedValueRef::SimpleLiteral(value) => value.value.to_owned(),
            TypedValueRef::LanguageStringLiteral(value) => value.value.to_owned(),
            TypedValueRef::DateTimeLiteral(value) => value.to_string(),
            TypedValueRef::TimeLiteral(value) => value.to_string(),
            TypedValueRef::DateLiteral(value) => value.to_string(),
            TypedValueRef::DurationLiteral(value) => value.to_string(),
            TypedValueRef::YearMonthDurationLiteral(value) => value.to_string(),
            TypedValueRef::DayTimeDurationLiteral(value) => value.to_string(),
            TypedValueRef::OtherLiteral(value) => value.value().to_owned(),
        };
        Ok(SimpleLiteral::new(lexical))
    }
}

#[derive(Debug, Default)]
pub struct CastBooleanRdfOp;

impl CastBooleanRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastBooleanRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::BooleanLiteral(value) => Ok(value),
            TypedValueRef::NumericLiteral(value) => Ok((!value.is_zero_or_nan()).into()),
            TypedValueRef::SimpleLiteral(value) => Ok(Boolean::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CastIntegerRdfOp;

impl CastIntegerRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastIntegerRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::BooleanLiteral(value) => Ok(Integer::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Integer(value)) => Ok(value),
            TypedValueRef::NumericLiteral(Numeric::Decimal(value)) => Ok(Integer::try_from(value)?),
            TypedValueRef::NumericLiteral(Numeric::Float(value)) => Ok(Integer::try_from(value)?),
            TypedValueRef::NumericLiteral(Numeric::Double(value)) => Ok(Integer::try_from(value)?),
            TypedValueRef::SimpleLiteral(value) => Ok(Integer::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CastDecimalRdfOp;

impl CastDecimalRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastDecimalRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Decimal;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::BooleanLiteral(value) => Ok(Decimal::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Integer(value)) => Ok(Decimal::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Decimal(value)) => Ok(value),
            TypedValueRef::NumericLiteral(Numeric::Float(value)) => Ok(Decimal::try_from(value)?),
            TypedValueRef::NumericLiteral(Numeric::Double(value)) => Ok(Decimal::try_from(value)?),
            TypedValueRef::SimpleLiteral(value) => Ok(Decimal::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CastFloatRdfOp;

impl CastFloatRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastFloatRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Float;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::BooleanLiteral(value) => Ok(Float::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Integer(value)) => Ok(Float::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Decimal(value)) => Ok(Float::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Float(value)) => Ok(value),
            TypedValueRef::NumericLiteral(Numeric::Double(value)) => Ok(Float::from(value)),
            TypedValueRef::SimpleLiteral(value) => Ok(Float::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CastDoubleRdfOp;

impl CastDoubleRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastDoubleRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Double;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::BooleanLiteral(value) => Ok(Double::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Integer(value)) => Ok(Double::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Decimal(value)) => Ok(Double::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Float(value)) => Ok(Double::from(value)),
            TypedValueRef::NumericLiteral(Numeric::Double(value)) => Ok(value),
            TypedValueRef::SimpleLiteral(value) => Ok(Double::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CastDateTimeRdfOp;

impl CastDateTimeRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CastDateTimeRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = DateTime;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            TypedValueRef::DateTimeLiteral(value) => Ok(value),
            TypedValueRef::DateLiteral(value) => Ok(DateTime::try_from(value)?),
            TypedValueRef::SimpleLiteral(value) => Ok(DateTime::from_str(value.value)?),
            _ => ThinError::expected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::SimpleLiteralRef;

    fn string(value: &str) -> TypedValueRef<'_> {
        TypedValueRef::SimpleLiteral(SimpleLiteralRef::new(value))
    }

    #[test]
    fn strings_are_parsed() {
        assert_eq!(
            CastIntegerRdfOp::new().evaluate(string("42")),
            Ok(Integer::from(42))
        );
        assert!(CastIntegerRdfOp::new().evaluate(string("4.2")).is_err());
        assert_eq!(
            CastBooleanRdfOp::new().evaluate(string("1")),
            Ok(true.into())
        );
        assert!(CastDateTimeRdfOp::new().evaluate(string("yesterday")).is_err());
    }

    #[test]
    fn numbers_are_converted() {
        let decimal = TypedValueRef::NumericLiteral(Numeric::Decimal(Decimal::from_str("2.5").unwrap()));
        assert_eq!(
            CastDoubleRdfOp::new().evaluate(decimal),
            Ok(Double::from(2.5))
        );
        assert_eq!(
            CastStringRdfOp::new().evaluate(decimal),
            Ok(SimpleLiteral::new("2.5"))
        );
        let zero = TypedValueRef::NumericLiteral(Numeric::Integer(Integer::from(0)));
        assert_eq!(
            CastBooleanRdfOp::new().evaluate(zero),
            Ok(false.into())
        );
    }

    #[test]
    fn blank_nodes_cannot_be_cast() {
        let blank = rdf_loom_model::BlankNode::default();
        assert!(CastStringRdfOp::new()
            .evaluate(TypedValueRef::BlankNode(blank.as_ref()))
            .is_err());
    }
}
