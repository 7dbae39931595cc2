use crate::{ScalarBinaryRdfOp, ScalarUnaryRdfOp};
use rdf_loom_model::{
    Decimal, Duration, Numeric, NumericPair, ThinError, ThinResult, TypedValue, TypedValueRef,
};

/// The `+` operator.
///
/// Besides numbers, it adds durations to `xsd:dateTime`, `xsd:date` and `xsd:time` values and
/// adds durations to each other.
#[derive(Debug, Default)]
pub struct AddRdfOp;

impl AddRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for AddRdfOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = TypedValue;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let result = match (lhs, rhs) {
            (TypedValueRef::NumericLiteral(lhs), TypedValueRef::NumericLiteral(rhs)) => {
                TypedValue::NumericLiteral(numeric_add(lhs, rhs)?)
            }
            (TypedValueRef::DateTimeLiteral(lhs), TypedValueRef::YearMonthDurationLiteral(rhs))
            | (TypedValueRef::YearMonthDurationLiteral(rhs), TypedValueRef::DateTimeLiteral(lhs)) => {
                lhs.checked_add_year_month_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateTimeLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs))
            | (TypedValueRef::DayTimeDurationLiteral(rhs), TypedValueRef::DateTimeLiteral(lhs)) => {
                lhs.checked_add_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateLiteral(lhs), TypedValueRef::YearMonthDurationLiteral(rhs))
            | (TypedValueRef::YearMonthDurationLiteral(rhs), TypedValueRef::DateLiteral(lhs)) => {
                lhs.checked_add_year_month_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs))
            | (TypedValueRef::DayTimeDurationLiteral(rhs), TypedValueRef::DateLiteral(lhs)) => {
                lhs.checked_add_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::TimeLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs))
            | (TypedValueRef::DayTimeDurationLiteral(rhs), TypedValueRef::TimeLiteral(lhs)) => {
                lhs.checked_add_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (
                TypedValueRef::YearMonthDurationLiteral(lhs),
                TypedValueRef::YearMonthDurationLiteral(rhs),
            ) => lhs.checked_add(rhs).ok_or(ThinError::default())?.into(),
            (
                TypedValueRef::DayTimeDurationLiteral(lhs),
                TypedValueRef::DayTimeDurationLiteral(rhs),
            ) => lhs.checked_add(rhs).ok_or(ThinError::default())?.into(),
            (lhs, rhs) => {
                let (lhs, rhs) = durations(lhs, rhs)?;
                lhs.checked_add(rhs).ok_or(ThinError::default())?.into()
            }
        };
        Ok(result)
    }
}

/// The binary `-` operator.
///
/// Subtracting two `xsd:dateTime` (or `xsd:date`, `xsd:time`) values yields an
/// `xsd:dayTimeDuration`.
#[derive(Debug, Default)]
pub struct SubRdfOp;

impl SubRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for SubRdfOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = TypedValue;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let result = match (lhs, rhs) {
            (TypedValueRef::NumericLiteral(lhs), TypedValueRef::NumericLiteral(rhs)) => {
                TypedValue::NumericLiteral(numeric_sub(lhs, rhs)?)
            }
            (TypedValueRef::DateTimeLiteral(lhs), TypedValueRef::DateTimeLiteral(rhs)) => {
                lhs.checked_sub(rhs).ok_or(ThinError::default())?.into()
            }
            (TypedValueRef::DateLiteral(lhs), TypedValueRef::DateLiteral(rhs)) => {
                lhs.checked_sub(rhs).ok_or(ThinError::default())?.into()
            }
            (TypedValueRef::TimeLiteral(lhs), TypedValueRef::TimeLiteral(rhs)) => {
                lhs.checked_sub(rhs).ok_or(ThinError::default())?.into()
            }
            (TypedValueRef::DateTimeLiteral(lhs), TypedValueRef::YearMonthDurationLiteral(rhs)) => {
                lhs.checked_sub_year_month_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateTimeLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs)) => {
                lhs.checked_sub_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateLiteral(lhs), TypedValueRef::YearMonthDurationLiteral(rhs)) => {
                lhs.checked_sub_year_month_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::DateLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs)) => {
                lhs.checked_sub_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (TypedValueRef::TimeLiteral(lhs), TypedValueRef::DayTimeDurationLiteral(rhs)) => {
                lhs.checked_sub_day_time_duration(rhs)
                    .ok_or(ThinError::default())?
                    .into()
            }
            (
                TypedValueRef::YearMonthDurationLiteral(lhs),
                TypedValueRef::YearMonthDurationLiteral(rhs),
            ) => lhs.checked_sub(rhs).ok_or(ThinError::default())?.into(),
            (
                TypedValueRef::DayTimeDurationLiteral(lhs),
                TypedValueRef::DayTimeDurationLiteral(rhs),
            ) => lhs.checked_sub(rhs).ok_or(ThinError::default())?.into(),
            (lhs, rhs) => {
                let (lhs, rhs) = durations(lhs, rhs)?;
                lhs.checked_sub(rhs).ok_or(ThinError::default())?.into()
            }
        };
        Ok(result)
    }
}

/// The `*` operator.
#[derive(Debug, Default)]
pub struct MulRdfOp;

impl MulRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for MulRdfOp {
    type ArgLhs<'data> = Numeric;
    type ArgRhs<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        match NumericPair::with_casts_from(lhs, rhs) {
            NumericPair::Integer(lhs, rhs) => {
                lhs.checked_mul(rhs).map(Numeric::Integer).ok_or(ThinError::default())
            }
            NumericPair::Decimal(lhs, rhs) => {
                lhs.checked_mul(rhs).map(Numeric::Decimal).ok_or(ThinError::default())
            }
            NumericPair::Float(lhs, rhs) => Ok(Numeric::Float(lhs * rhs)),
            NumericPair::Double(lhs, rhs) => Ok(Numeric::Double(lhs * rhs)),
        }
    }
}

/// The `/` operator. Dividing two integers yields a decimal.
#[derive(Debug, Default)]
pub struct DivRdfOp;

impl DivRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for DivRdfOp {
    type ArgLhs<'data> = Numeric;
    type ArgRhs<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        match NumericPair::with_casts_from(lhs, rhs) {
            NumericPair::Integer(lhs, rhs) => Decimal::from(lhs)
                .checked_div(rhs)
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            NumericPair::Decimal(lhs, rhs) => {
                lhs.checked_div(rhs).map(Numeric::Decimal).ok_or(ThinError::default())
            }
            NumericPair::Float(lhs, rhs) => Ok(Numeric::Float(lhs / rhs)),
            NumericPair::Double(lhs, rhs) => Ok(Numeric::Double(lhs / rhs)),
        }
    }
}

/// The unary `+` operator.
#[derive(Debug, Default)]
pub struct UnaryPlusRdfOp;

impl UnaryPlusRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for UnaryPlusRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        Ok(value)
    }
}

/// The unary `-` operator.
#[derive(Debug, Default)]
pub struct UnaryMinusRdfOp;

impl UnaryMinusRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for UnaryMinusRdfOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(value) => value
                .checked_neg()
                .map(Numeric::Integer)
                .ok_or(ThinError::default()),
            Numeric::Decimal(value) => value
                .checked_neg()
                .map(Numeric::Decimal)
                .ok_or(ThinError::default()),
            Numeric::Float(value) => Ok(Numeric::Float(-value)),
            Numeric::Double(value) => Ok(Numeric::Double(-value)),
        }
    }
}

/// Numeric addition after type promotion. Also used by the `SUM` and `AVG` aggregates.
pub fn numeric_add(lhs: Numeric, rhs: Numeric) -> ThinResult<Numeric> {
    match NumericPair::with_casts_from(lhs, rhs) {
        NumericPair::Integer(lhs, rhs) => lhs.checked_add(rhs).map(Numeric::Integer),
        NumericPair::Decimal(lhs, rhs) => lhs.checked_add(rhs).map(Numeric::Decimal),
        NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs + rhs)),
        NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs + rhs)),
    }
    .ok_or(ThinError::default())
}

fn numeric_sub(lhs: Numeric, rhs: Numeric) -> ThinResult<Numeric> {
    match NumericPair::with_casts_from(lhs, rhs) {
        NumericPair::Integer(lhs, rhs) => lhs.checked_sub(rhs).map(Numeric::Integer),
        NumericPair::Decimal(lhs, rhs) => lhs.checked_sub(rhs).map(Numeric::Decimal),
        NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs - rhs)),
        NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs - rhs)),
    }
    .ok_or(ThinError::default())
}

/// Mixed duration kinds are combined as plain `xsd:duration` values.
fn durations(lhs: TypedValueRef<'_>, rhs: TypedValueRef<'_>) -> ThinResult<(Duration, Duration)> {
    fn duration(value: TypedValueRef<'_>) -> ThinResult<Duration> {
        match value {
            TypedValueRef::DurationLiteral(value) => Ok(value),
            TypedValueRef::YearMonthDurationLiteral(value) => Ok(value.into()),
            TypedValueRef::DayTimeDurationLiteral(value) => Ok(value.into()),
            _ => ThinError::expected(),
        }
    }
    Ok((duration(lhs)?, duration(rhs)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::{
        DateTime, DayTimeDuration, Double, Integer, Literal, Term, YearMonthDuration,
    };
    use std::str::FromStr;

    #[test]
    fn date_time_plus_year_month_duration() {
        let date_time = DateTime::from_str("2019-05-28T12:14:45Z").unwrap();
        let duration = YearMonthDuration::from_str("P1Y").unwrap();
        let result = AddRdfOp::new()
            .evaluate(
                TypedValueRef::DateTimeLiteral(date_time),
                TypedValueRef::YearMonthDurationLiteral(duration),
            )
            .unwrap();
        assert_eq!(
            result,
            TypedValue::DateTimeLiteral(DateTime::from_str("2020-05-28T12:14:45+00:00").unwrap())
        );
        assert_eq!(
            Term::from(result),
            Term::from(Literal::new_typed_literal(
                "2020-05-28T12:14:45Z",
                rdf_loom_model::vocab::xsd::DATE_TIME
            ))
        );
    }

    #[test]
    fn date_time_difference_is_day_time_duration() {
        let a = DateTime::from_str("2020-01-02T00:00:00Z").unwrap();
        let b = DateTime::from_str("2020-01-01T12:00:00Z").unwrap();
        let result = SubRdfOp::new()
            .evaluate(
                TypedValueRef::DateTimeLiteral(a),
                TypedValueRef::DateTimeLiteral(b),
            )
            .unwrap();
        assert_eq!(
            result,
            TypedValue::DayTimeDurationLiteral(DayTimeDuration::from_str("PT12H").unwrap())
        );
    }

    #[test]
    fn integer_division_yields_decimal() {
        let result = DivRdfOp::new()
            .evaluate(
                Numeric::Integer(Integer::from(1)),
                Numeric::Integer(Integer::from(4)),
            )
            .unwrap();
        assert!(matches!(result, Numeric::Decimal(_)));
        assert_eq!(result, Numeric::Decimal(Decimal::from_str("0.25").unwrap()));
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        let result = DivRdfOp::new().evaluate(
            Numeric::Integer(Integer::from(1)),
            Numeric::Integer(Integer::from(0)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn addition_promotes_types() {
        let result = numeric_add(
            Numeric::Integer(Integer::from(1)),
            Numeric::Double(Double::from(0.5)),
        )
        .unwrap();
        assert!(matches!(result, Numeric::Double(_)));
        assert_eq!(result, Numeric::Double(Double::from(1.5)));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let result = numeric_add(
            Numeric::Integer(Integer::from(i64::MAX)),
            Numeric::Integer(Integer::from(1)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn strings_cannot_be_added() {
        let result = AddRdfOp::new().evaluate(
            TypedValueRef::SimpleLiteral(rdf_loom_model::SimpleLiteralRef::new("a")),
            TypedValueRef::NumericLiteral(Numeric::Integer(Integer::from(1))),
        );
        assert!(result.is_err());
    }
}
