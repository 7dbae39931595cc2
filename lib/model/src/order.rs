//! Orderings over RDF terms.
//!
//! SPARQL knows two orderings: the partial order used by the comparison operators (`<`, `>`,
//! ...) which is only defined between values of compatible types, and the total order used by
//! `ORDER BY` which has to order every pair of terms (including unbound values).

use crate::{Decimal, TimezoneOffset, TypedValueRef};
use oxrdf::TermRef;
use std::cmp::Ordering;

/// The average length of a Gregorian month in seconds.
const SECONDS_PER_MONTH: i64 = 2_629_746;

impl PartialOrd for TypedValueRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        compare_values(*self, *other)
    }
}

/// Compares two values as done by the SPARQL comparison operators.
///
/// Returns [None] if the values are not comparable (e.g., a string and a number).
pub fn compare_values(a: TypedValueRef<'_>, b: TypedValueRef<'_>) -> Option<Ordering> {
    match a {
        TypedValueRef::SimpleLiteral(a) => match b {
            TypedValueRef::SimpleLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::LanguageStringLiteral(a) => match b {
            TypedValueRef::LanguageStringLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::BooleanLiteral(a) => match b {
            TypedValueRef::BooleanLiteral(b) => bool::from(a).partial_cmp(&bool::from(b)),
            _ => None,
        },
        TypedValueRef::NumericLiteral(a) => match b {
            TypedValueRef::NumericLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DateTimeLiteral(a) => match b {
            TypedValueRef::DateTimeLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::TimeLiteral(a) => match b {
            TypedValueRef::TimeLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DateLiteral(a) => match b {
            TypedValueRef::DateLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::YearMonthDurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DayTimeDurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::OtherLiteral(a) => match b {
            TypedValueRef::OtherLiteral(b) if a == b => Some(Ordering::Equal),
            _ => None,
        },
        TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) => None,
    }
}

/// The total order used for sorting solutions.
///
/// Unbound values come first, followed by blank nodes, IRIs and literals. Literals are grouped by
/// the kind of their value. Within a group they are ordered by value and ties are broken by the
/// lexical form, then the datatype and finally the language tag.
///
/// Values of a group that [compare_values] cannot order still get a consistent position. Date and
/// time values without a timezone are placed as if they were in UTC. Durations are placed by their
/// length with an average month.
pub fn compare_for_ordering(a: Option<TermRef<'_>>, b: Option<TermRef<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_terms(a, b),
    }
}

fn compare_terms(a: TermRef<'_>, b: TermRef<'_>) -> Ordering {
    match (a, b) {
        (TermRef::BlankNode(a), TermRef::BlankNode(b)) => a.as_str().cmp(b.as_str()),
        (TermRef::BlankNode(_), _) => Ordering::Less,
        (_, TermRef::BlankNode(_)) => Ordering::Greater,
        (TermRef::NamedNode(a), TermRef::NamedNode(b)) => a.as_str().cmp(b.as_str()),
        (TermRef::NamedNode(_), _) => Ordering::Less,
        (_, TermRef::NamedNode(_)) => Ordering::Greater,
        (TermRef::Literal(a), TermRef::Literal(b)) => {
            let value_a = TypedValueRef::from_literal(a);
            let value_b = TypedValueRef::from_literal(b);
            literal_group(value_a)
                .cmp(&literal_group(value_b))
                .then_with(|| compare_in_group(value_a, value_b))
                .then_with(|| a.value().cmp(b.value()))
                .then_with(|| a.datatype().as_str().cmp(b.datatype().as_str()))
                .then_with(|| a.language().cmp(&b.language()))
        }
    }
}

/// The value in UTC without a timezone. Values without a timezone are kept as they are.
macro_rules! in_utc {
    ($value:expr) => {
        match $value.timezone_offset() {
            Some(_) => $value
                .adjust(Some(TimezoneOffset::UTC))
                .and_then(|value| value.adjust(None)),
            None => Some($value),
        }
    };
}

/// A total order on the values of one literal group that agrees with [compare_values].
fn compare_in_group(a: TypedValueRef<'_>, b: TypedValueRef<'_>) -> Ordering {
    match (a, b) {
        (TypedValueRef::DateTimeLiteral(a), TypedValueRef::DateTimeLiteral(b)) => {
            compare_keys(in_utc!(a), in_utc!(b))
        }
        (TypedValueRef::DateLiteral(a), TypedValueRef::DateLiteral(b)) => {
            compare_keys(in_utc!(a), in_utc!(b))
        }
        (TypedValueRef::TimeLiteral(a), TypedValueRef::TimeLiteral(b)) => {
            compare_keys(in_utc!(a), in_utc!(b))
        }
        (
            TypedValueRef::DurationLiteral(_)
            | TypedValueRef::YearMonthDurationLiteral(_)
            | TypedValueRef::DayTimeDurationLiteral(_),
            _,
        ) => duration_key(a).cmp(&duration_key(b)),
        _ => {
            // NaN is the only value that is not comparable to itself.
            let ordered_a = compare_values(a, a).is_some();
            let ordered_b = compare_values(b, b).is_some();
            ordered_a
                .cmp(&ordered_b)
                .then_with(|| compare_values(a, b).unwrap_or(Ordering::Equal))
        }
    }
}

/// Compares two values without a timezone. Values that could not be converted come first.
fn compare_keys<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// The length of a duration in seconds, counting a month with its average length, and the number
/// of months.
fn duration_key(value: TypedValueRef<'_>) -> Option<(Decimal, i64)> {
    let (years, months, days, hours, minutes, seconds) = match value {
        TypedValueRef::DurationLiteral(value) => (
            value.years(),
            value.months(),
            value.days(),
            value.hours(),
            value.minutes(),
            value.seconds(),
        ),
        TypedValueRef::YearMonthDurationLiteral(value) => {
            (value.years(), value.months(), 0, 0, 0, Decimal::from(0))
        }
        TypedValueRef::DayTimeDurationLiteral(value) => (
            0,
            0,
            value.days(),
            value.hours(),
            value.minutes(),
            value.seconds(),
        ),
        _ => return None,
    };
    let months = years.checked_mul(12)?.checked_add(months)?;
    let whole_seconds = months
        .checked_mul(SECONDS_PER_MONTH)?
        .checked_add(days.checked_mul(86_400)?)?
        .checked_add(hours.checked_mul(3_600)?)?
        .checked_add(minutes.checked_mul(60)?)?;
    Some((Decimal::from(whole_seconds).checked_add(seconds)?, months))
}

fn literal_group(value: TypedValueRef<'_>) -> u8 {
    match value {
        TypedValueRef::SimpleLiteral(_) => 0,
        TypedValueRef::LanguageStringLiteral(_) => 1,
        TypedValueRef::BooleanLiteral(_) => 2,
        TypedValueRef::NumericLiteral(_) => 3,
        TypedValueRef::DateTimeLiteral(_) => 4,
        TypedValueRef::DateLiteral(_) => 5,
        TypedValueRef::TimeLiteral(_) => 6,
        TypedValueRef::DurationLiteral(_)
        | TypedValueRef::YearMonthDurationLiteral(_)
        | TypedValueRef::DayTimeDurationLiteral(_) => 7,
        TypedValueRef::OtherLiteral(_) => 8,
        TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) => 9,
    }
}
