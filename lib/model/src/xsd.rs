use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

pub use oxsdatatypes::{
    Boolean, Date, DateTime, DayTimeDuration, Decimal, Double, Duration, Float, Integer, Time,
    TimezoneOffset, YearMonthDuration,
};

/// Checks if the datatype is `xsd:integer` or one of the types derived from it.
pub fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    static INTEGER_DATATYPES: &[NamedNodeRef<'_>; 13] = &[
        xsd::INTEGER,
        xsd::BYTE,
        xsd::SHORT,
        xsd::INT,
        xsd::LONG,
        xsd::UNSIGNED_BYTE,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_LONG,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NON_NEGATIVE_INTEGER,
    ];
    INTEGER_DATATYPES.contains(&datatype)
}

/// Checks if the datatype is a numeric datatype.
pub fn is_numeric_datatype(datatype: NamedNodeRef<'_>) -> bool {
    datatype == xsd::DECIMAL
        || datatype == xsd::FLOAT
        || datatype == xsd::DOUBLE
        || is_integer_datatype(datatype)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_integer_types_are_numeric() {
        assert!(is_numeric_datatype(xsd::UNSIGNED_SHORT));
        assert!(is_numeric_datatype(xsd::DOUBLE));
        assert!(!is_integer_datatype(xsd::DECIMAL));
        assert!(!is_numeric_datatype(xsd::STRING));
    }
}
