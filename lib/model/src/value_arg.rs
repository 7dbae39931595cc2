use crate::{
    Boolean, Date, DateTime, DayTimeDuration, Duration, Integer, LanguageStringRef, Numeric,
    SimpleLiteralRef, StringLiteralRef, ThinError, ThinResult, Time, TypedValueRef,
};
use oxrdf::{BlankNodeRef, NamedNodeRef};

/// A type that can be extracted from a [TypedValueRef] when it is passed as an argument to a
/// SPARQL function.
///
/// Extraction fails with a [ThinError] if the value is of another type, which is the usual way
/// for a function to signal a type error.
pub trait RdfTermValueArg<'data>: Copy {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self>;
}

impl<'data> RdfTermValueArg<'data> for TypedValueRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        Ok(value)
    }
}

impl<'data> RdfTermValueArg<'data> for NamedNodeRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        match value {
            TypedValueRef::NamedNode(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl<'data> RdfTermValueArg<'data> for BlankNodeRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        match value {
            TypedValueRef::BlankNode(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for Boolean {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::BooleanLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for Numeric {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::NumericLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for Integer {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::NumericLiteral(Numeric::Integer(inner)) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl<'data> RdfTermValueArg<'data> for SimpleLiteralRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        match value {
            TypedValueRef::SimpleLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl<'data> RdfTermValueArg<'data> for LanguageStringRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        match value {
            TypedValueRef::LanguageStringLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl<'data> RdfTermValueArg<'data> for StringLiteralRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> ThinResult<Self> {
        match value {
            TypedValueRef::SimpleLiteral(inner) => Ok(StringLiteralRef(inner.value, None)),
            TypedValueRef::LanguageStringLiteral(inner) => {
                Ok(StringLiteralRef(inner.value, Some(inner.language)))
            }
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for DateTime {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::DateTimeLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for Date {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::DateLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for Time {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::TimeLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}

/// Any of the three duration types is accepted as a [Duration].
impl RdfTermValueArg<'_> for Duration {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::DurationLiteral(inner) => Ok(inner),
            TypedValueRef::YearMonthDurationLiteral(inner) => Ok(inner.into()),
            TypedValueRef::DayTimeDurationLiteral(inner) => Ok(inner.into()),
            _ => ThinError::expected(),
        }
    }
}

impl RdfTermValueArg<'_> for DayTimeDuration {
    fn try_from_value(value: TypedValueRef<'_>) -> ThinResult<Self> {
        match value {
            TypedValueRef::DayTimeDurationLiteral(inner) => Ok(inner),
            _ => ThinError::expected(),
        }
    }
}
