use crate::{Decimal, Double, Float, Integer};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNodeRef};
use std::cmp::Ordering;

/// A value of one of the four primitive numeric types of XSD.
///
/// Types derived from `xsd:integer` (e.g., `xsd:int`) are represented as [Numeric::Integer].
#[derive(Copy, Clone, Debug)]
pub enum Numeric {
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
}

impl Numeric {
    /// Returns the datatype of the value after type promotion.
    pub fn datatype(&self) -> NamedNodeRef<'static> {
        match self {
            Numeric::Integer(_) => xsd::INTEGER,
            Numeric::Decimal(_) => xsd::DECIMAL,
            Numeric::Float(_) => xsd::FLOAT,
            Numeric::Double(_) => xsd::DOUBLE,
        }
    }

    #[must_use]
    pub fn format_value(&self) -> String {
        match self {
            Numeric::Integer(value) => value.to_string(),
            Numeric::Decimal(value) => value.to_string(),
            Numeric::Float(value) => value.to_string(),
            Numeric::Double(value) => value.to_string(),
        }
    }

    /// Whether this value is zero or NaN, i.e., whether its effective boolean value is `false`.
    pub fn is_zero_or_nan(&self) -> bool {
        match self {
            Numeric::Integer(value) => *value == Integer::from(0),
            Numeric::Decimal(value) => *value == Decimal::from(0),
            Numeric::Float(value) => value.is_nan() || f32::from(*value) == 0.0,
            Numeric::Double(value) => value.is_nan() || f64::from(*value) == 0.0,
        }
    }
}

impl From<Numeric> for Literal {
    fn from(value: Numeric) -> Self {
        Literal::new_typed_literal(value.format_value(), value.datatype())
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match NumericPair::with_casts_from(*self, *other) {
            NumericPair::Integer(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Decimal(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Float(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Double(lhs, rhs) => lhs.partial_cmp(&rhs),
        }
    }
}

/// Two numeric values that have been promoted to a common type.
///
/// See [Operator Mapping](https://www.w3.org/TR/sparql11-query/#OperatorMapping).
pub enum NumericPair {
    Integer(Integer, Integer),
    Decimal(Decimal, Decimal),
    Float(Float, Float),
    Double(Double, Double),
}

impl NumericPair {
    pub fn with_casts_from(lhs: Numeric, rhs: Numeric) -> NumericPair {
        match (lhs, rhs) {
            (Numeric::Integer(lhs), Numeric::Integer(rhs)) => NumericPair::Integer(lhs, rhs),
            (Numeric::Integer(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Decimal(Decimal::from(lhs), rhs)
            }
            (Numeric::Integer(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs.into(), rhs),
            (Numeric::Integer(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Decimal(lhs), Numeric::Integer(rhs)) => NumericPair::Decimal(lhs, rhs.into()),
            (Numeric::Decimal(lhs), Numeric::Decimal(rhs)) => NumericPair::Decimal(lhs, rhs),
            (Numeric::Decimal(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs.into(), rhs),
            (Numeric::Decimal(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Float(lhs), Numeric::Integer(rhs)) => NumericPair::Float(lhs, rhs.into()),
            (Numeric::Float(lhs), Numeric::Decimal(rhs)) => NumericPair::Float(lhs, rhs.into()),
            (Numeric::Float(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs, rhs),
            (Numeric::Float(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs.into(), rhs),

            (Numeric::Double(lhs), Numeric::Integer(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Decimal(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Float(rhs)) => NumericPair::Double(lhs, rhs.into()),
            (Numeric::Double(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_picks_the_wider_type() {
        let pair = NumericPair::with_casts_from(
            Numeric::Integer(Integer::from(1)),
            Numeric::Decimal(Decimal::from(2)),
        );
        assert!(matches!(pair, NumericPair::Decimal(_, _)));

        let pair = NumericPair::with_casts_from(
            Numeric::Float(Float::from(1.5_f32)),
            Numeric::Double(Double::from(2.0)),
        );
        assert!(matches!(pair, NumericPair::Double(_, _)));
    }

    #[test]
    fn comparison_across_types() {
        let one = Numeric::Integer(Integer::from(1));
        let one_and_a_half = Numeric::Double(Double::from(1.5));
        assert_eq!(one.partial_cmp(&one_and_a_half), Some(Ordering::Less));
        assert_eq!(one, Numeric::Decimal(Decimal::from(1)));
    }

    #[test]
    fn nan_is_unordered() {
        let nan = Numeric::Double(Double::from(f64::NAN));
        assert_eq!(nan.partial_cmp(&nan), None);
        assert!(nan.is_zero_or_nan());
    }
}
