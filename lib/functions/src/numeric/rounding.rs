use crate::ScalarUnaryRdfOp;
use rdf_loom_model::{Numeric, ThinError, ThinResult};

#[derive(Debug, Default)]
pub struct AbsRdfOp;

impl AbsRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for AbsRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(value) => value
                .checked_abs()
                .map(Numeric::Integer)
                .ok_or(ThinError::default()),
            Numeric::Decimal(value) => value
                .checked_abs()
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            Numeric::Float(value) => Ok(Numeric::Float(value.abs())),
            Numeric::Double(value) => Ok(Numeric::Double(value.abs())),
        }
    }
}

#[derive(Debug, Default)]
pub struct CeilRdfOp;

impl CeilRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for CeilRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(_) => Ok(value),
            Numeric::Decimal(value) => value
                .checked_ceil()
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            Numeric::Float(value) => Ok(Numeric::Float(value.ceil())),
            Numeric::Double(value) => Ok(Numeric::Double(value.ceil())),
        }
    }
}

#[derive(Debug, Default)]
pub struct FloorRdfOp;

impl FloorRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for FloorRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(_) => Ok(value),
            Numeric::Decimal(value) => value
                .checked_floor()
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            Numeric::Float(value) => Ok(Numeric::Float(value.floor())),
            Numeric::Double(value) => Ok(Numeric::Double(value.floor())),
        }
    }
}

/// Rounds half values towards positive infinity, as `fn:round` does.
#[derive(Debug, Default)]
pub struct RoundRdfOp;

impl RoundRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for RoundRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(_) => Ok(value),
            Numeric::Decimal(value) => value
                .checked_round()
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            Numeric::Float(value) => Ok(Numeric::Float(value.round())),
            Numeric::Double(value) => Ok(Numeric::Double(value.round())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::{Decimal, Double, Integer};
    use std::str::FromStr;

    #[test]
    fn rounding_decimals() {
        let value = Numeric::Decimal(Decimal::from_str("2.5").unwrap());
        assert_eq!(
            RoundRdfOp::new().evaluate(value),
            Ok(Numeric::Decimal(Decimal::from(3)))
        );
        assert_eq!(
            FloorRdfOp::new().evaluate(value),
            Ok(Numeric::Decimal(Decimal::from(2)))
        );
        assert_eq!(
            CeilRdfOp::new().evaluate(value),
            Ok(Numeric::Decimal(Decimal::from(3)))
        );
    }

    #[test]
    fn abs_keeps_the_type() {
        assert_eq!(
            AbsRdfOp::new().evaluate(Numeric::Integer(Integer::from(-4))),
            Ok(Numeric::Integer(Integer::from(4)))
        );
        assert_eq!(
            AbsRdfOp::new().evaluate(Numeric::Double(Double::from(-1.5))),
            Ok(Numeric::Double(Double::from(1.5)))
        );
    }
}
