use crate::{ScalarNullaryRdfOp, ScalarUnaryRdfOp};
use rdf_loom_model::{
    DateTime, DayTimeDuration, Numeric, SimpleLiteral, ThinError, ThinResult, TypedValueRef,
};

macro_rules! date_time_component {
    ($(#[$meta:meta])* $name:ident, |$value:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl ScalarUnaryRdfOp for $name {
            type Arg<'data> = TypedValueRef<'data>;
            type Result<'data> = Numeric;

            fn evaluate<'data>(&self, $value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
                $body
            }
        }
    };
}

date_time_component!(
    /// `YEAR` of an `xsd:dateTime` or `xsd:date`.
    YearRdfOp,
    |value| match value {
        TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Integer(value.year().into())),
        TypedValueRef::DateLiteral(value) => Ok(Numeric::Integer(value.year().into())),
        _ => ThinError::expected(),
    }
);

date_time_component!(MonthRdfOp, |value| match value {
    TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Integer(value.month().into())),
    TypedValueRef::DateLiteral(value) => Ok(Numeric::Integer(value.month().into())),
    _ => ThinError::expected(),
});

date_time_component!(DayRdfOp, |value| match value {
    TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Integer(value.day().into())),
    TypedValueRef::DateLiteral(value) => Ok(Numeric::Integer(value.day().into())),
    _ => ThinError::expected(),
});

date_time_component!(HoursRdfOp, |value| match value {
    TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Integer(value.hour().into())),
    TypedValueRef::TimeLiteral(value) => Ok(Numeric::Integer(value.hour().into())),
    _ => ThinError::expected(),
});

date_time_component!(MinutesRdfOp, |value| match value {
    TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Integer(value.minute().into())),
    TypedValueRef::TimeLiteral(value) => Ok(Numeric::Integer(value.minute().into())),
    _ => ThinError::expected(),
});

date_time_component!(
    /// `SECONDS` returns an `xsd:decimal` that includes fractional seconds.
    SecondsRdfOp,
    |value| match value {
        TypedValueRef::DateTimeLiteral(value) => Ok(Numeric::Decimal(value.second())),
        TypedValueRef::TimeLiteral(value) => Ok(Numeric::Decimal(value.second())),
        _ => ThinError::expected(),
    }
);

/// `TIMEZONE`: the offset as `xsd:dayTimeDuration`. Values without a timezone are an error.
#[derive(Debug, Default)]
pub struct TimezoneRdfOp;

impl TimezoneRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for TimezoneRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = DayTimeDuration;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        let timezone = match value {
            TypedValueRef::DateTimeLiteral(value) => value.timezone(),
            TypedValueRef::DateLiteral(value) => value.timezone(),
            TypedValueRef::TimeLiteral(value) => value.timezone(),
            _ => return ThinError::expected(),
        };
        timezone.ok_or(ThinError::default())
    }
}

/// `TZ`: the offset as plain string, empty if there is none.
#[derive(Debug, Default)]
pub struct TzRdfOp;

impl TzRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for TzRdfOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = SimpleLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        let offset = match value {
            TypedValueRef::DateTimeLiteral(value) => value.timezone_offset(),
            TypedValueRef::DateLiteral(value) => value.timezone_offset(),
            TypedValueRef::TimeLiteral(value) => value.timezone_offset(),
            _ => return ThinError::expected(),
        };
        Ok(SimpleLiteral::new(
            offset.map(|offset| offset.to_string()).unwrap_or_default(),
        ))
    }
}

/// `NOW()`. The instant is fixed when the operator is created so that all calls within one
/// query evaluation agree.
#[derive(Debug)]
pub struct NowRdfOp {
    now: DateTime,
}

impl NowRdfOp {
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }
}

impl ScalarNullaryRdfOp for NowRdfOp {
    type Result = DateTime;

    fn evaluate(&self) -> ThinResult<Self::Result> {
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::{Date, Decimal, Integer, Time};
    use std::str::FromStr;

    #[test]
    fn components_of_date_time() {
        let value = TypedValueRef::DateTimeLiteral(
            DateTime::from_str("2011-01-10T14:45:13.815-05:00").unwrap(),
        );
        assert_eq!(
            YearRdfOp::new().evaluate(value),
            Ok(Numeric::Integer(Integer::from(2011)))
        );
        assert_eq!(
            MonthRdfOp::new().evaluate(value),
            Ok(Numeric::Integer(Integer::from(1)))
        );
        assert_eq!(
            HoursRdfOp::new().evaluate(value),
            Ok(Numeric::Integer(Integer::from(14)))
        );
        assert_eq!(
            SecondsRdfOp::new().evaluate(value),
            Ok(Numeric::Decimal(Decimal::from_str("13.815").unwrap()))
        );
        assert_eq!(
            TimezoneRdfOp::new().evaluate(value),
            Ok(DayTimeDuration::from_str("-PT5H").unwrap())
        );
        assert_eq!(
            TzRdfOp::new().evaluate(value).map(|tz| tz.value),
            Ok("-05:00".to_owned())
        );
    }

    #[test]
    fn tz_of_utc_and_local_values() {
        let utc = TypedValueRef::DateLiteral(Date::from_str("2011-01-10Z").unwrap());
        assert_eq!(
            TzRdfOp::new().evaluate(utc).map(|tz| tz.value),
            Ok("Z".to_owned())
        );

        let local = TypedValueRef::TimeLiteral(Time::from_str("14:45:13").unwrap());
        assert_eq!(
            TzRdfOp::new().evaluate(local).map(|tz| tz.value),
            Ok(String::new())
        );
        assert!(TimezoneRdfOp::new().evaluate(local).is_err());
    }

    #[test]
    fn year_of_a_string_is_an_error() {
        let value = TypedValueRef::SimpleLiteral(rdf_loom_model::SimpleLiteralRef::new("2011"));
        assert!(YearRdfOp::new().evaluate(value).is_err());
    }
}
