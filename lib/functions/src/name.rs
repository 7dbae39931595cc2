use rdf_loom_model::vocab::xsd;
use rdf_loom_model::{NamedNode, NamedNodeRef};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The builtin functions that are called by name.
///
/// Operators (e.g., `+` or `<`) and the functional forms that control the evaluation of their
/// arguments (`BOUND`, `IF`, `COALESCE`, `EXISTS`) are part of the expression algebra and not
/// listed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinName {
    // Terms
    Str,
    Lang,
    LangMatches,
    Datatype,
    Iri,
    BNode,
    StrDt,
    StrLang,
    Uuid,
    StrUuid,
    SameTerm,
    IsIri,
    IsBlank,
    IsLiteral,
    IsNumeric,

    // Numeric
    Rand,
    Abs,
    Ceil,
    Floor,
    Round,

    // Strings
    Concat,
    SubStr,
    StrLen,
    Replace,
    UCase,
    LCase,
    EncodeForUri,
    Contains,
    StrStarts,
    StrEnds,
    StrBefore,
    StrAfter,
    Regex,

    // Dates and times
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Timezone,
    Tz,
    Now,

    // Hashing
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,

    // Casts
    CastString,
    CastBoolean,
    CastInteger,
    CastDecimal,
    CastFloat,
    CastDouble,
    CastDateTime,
}

const KEYWORDS: &[(&str, BuiltinName)] = &[
    ("STR", BuiltinName::Str),
    ("LANG", BuiltinName::Lang),
    ("LANGMATCHES", BuiltinName::LangMatches),
    ("DATATYPE", BuiltinName::Datatype),
    ("IRI", BuiltinName::Iri),
    ("URI", BuiltinName::Iri),
    ("BNODE", BuiltinName::BNode),
    ("STRDT", BuiltinName::StrDt),
    ("STRLANG", BuiltinName::StrLang),
    ("UUID", BuiltinName::Uuid),
    ("STRUUID", BuiltinName::StrUuid),
    ("SAMETERM", BuiltinName::SameTerm),
    ("ISIRI", BuiltinName::IsIri),
    ("ISURI", BuiltinName::IsIri),
    ("ISBLANK", BuiltinName::IsBlank),
    ("ISLITERAL", BuiltinName::IsLiteral),
    ("ISNUMERIC", BuiltinName::IsNumeric),
    ("RAND", BuiltinName::Rand),
    ("ABS", BuiltinName::Abs),
    ("CEIL", BuiltinName::Ceil),
    ("FLOOR", BuiltinName::Floor),
    ("ROUND", BuiltinName::Round),
    ("CONCAT", BuiltinName::Concat),
    ("SUBSTR", BuiltinName::SubStr),
    ("STRLEN", BuiltinName::StrLen),
    ("REPLACE", BuiltinName::Replace),
    ("UCASE", BuiltinName::UCase),
    ("LCASE", BuiltinName::LCase),
    ("ENCODE_FOR_URI", BuiltinName::EncodeForUri),
    ("CONTAINS", BuiltinName::Contains),
    ("STRSTARTS", BuiltinName::StrStarts),
    ("STRENDS", BuiltinName::StrEnds),
    ("STRBEFORE", BuiltinName::StrBefore),
    ("STRAFTER", BuiltinName::StrAfter),
    ("REGEX", BuiltinName::Regex),
    ("YEAR", BuiltinName::Year),
    ("MONTH", BuiltinName::Month),
    ("DAY", BuiltinName::Day),
    ("HOURS", BuiltinName::Hours),
    ("MINUTES", BuiltinName::Minutes),
    ("SECONDS", BuiltinName::Seconds),
    ("TIMEZONE", BuiltinName::Timezone),
    ("TZ", BuiltinName::Tz),
    ("NOW", BuiltinName::Now),
    ("MD5", BuiltinName::Md5),
    ("SHA1", BuiltinName::Sha1),
    ("SHA256", BuiltinName::Sha256),
    ("SHA384", BuiltinName::Sha384),
    ("SHA512", BuiltinName::Sha512),
];

const CASTS: &[(NamedNodeRef<'static>, BuiltinName)] = &[
    (xsd::STRING, BuiltinName::CastString),
    (xsd::BOOLEAN, BuiltinName::CastBoolean),
    (xsd::INTEGER, BuiltinName::CastInteger),
    (xsd::DECIMAL, BuiltinName::CastDecimal),
    (xsd::FLOAT, BuiltinName::CastFloat),
    (xsd::DOUBLE, BuiltinName::CastDouble),
    (xsd::DATE_TIME, BuiltinName::CastDateTime),
];

impl BuiltinName {
    /// Looks up a builtin by its (case-insensitive) keyword, e.g. `strlen`.
    pub fn from_keyword(keyword: &str) -> Result<Self, UnknownBuiltinError> {
        KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(keyword))
            .map(|(_, builtin)| *builtin)
            .ok_or_else(|| UnknownBuiltinError(keyword.to_owned()))
    }

    /// Returns the cast builtin for an XSD constructor function IRI (e.g., `xsd:integer`).
    pub fn from_cast_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        CASTS
            .iter()
            .find(|(target, _)| *target == iri)
            .map(|(_, builtin)| *builtin)
    }

    /// Returns the datatype produced by a cast, if this builtin is a cast.
    pub fn cast_target(self) -> Option<NamedNodeRef<'static>> {
        CASTS
            .iter()
            .find(|(_, builtin)| *builtin == self)
            .map(|(target, _)| *target)
    }

    /// Whether two calls with the same arguments may return different values.
    pub fn is_volatile(self) -> bool {
        matches!(
            self,
            BuiltinName::Rand | BuiltinName::BNode | BuiltinName::Uuid | BuiltinName::StrUuid
        )
    }
}

impl Display for BuiltinName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(target) = self.cast_target() {
            return write!(f, "{target}");
        }
        let keyword = KEYWORDS
            .iter()
            .find(|(_, builtin)| builtin == self)
            .map_or("?", |(name, _)| *name);
        f.write_str(&keyword.to_ascii_lowercase())
    }
}

/// Identifier for a function. Either it is a SPARQL builtin or a custom function identified by
/// an IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionName {
    Builtin(BuiltinName),
    Custom(NamedNode),
}

impl Display for FunctionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionName::Builtin(builtin) => builtin.fmt(f),
            FunctionName::Custom(name) => name.fmt(f),
        }
    }
}

/// The name does not identify a builtin function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown builtin function: {0}")]
pub struct UnknownBuiltinError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(BuiltinName::from_keyword("strlen"), Ok(BuiltinName::StrLen));
        assert_eq!(BuiltinName::from_keyword("URI"), Ok(BuiltinName::Iri));
        assert!(BuiltinName::from_keyword("frobnicate").is_err());
    }

    #[test]
    fn casts_are_identified_by_iri() {
        assert_eq!(
            BuiltinName::from_cast_iri(xsd::INTEGER),
            Some(BuiltinName::CastInteger)
        );
        assert_eq!(BuiltinName::from_cast_iri(xsd::G_YEAR), None);
        assert_eq!(
            BuiltinName::CastDouble.to_string(),
            "<http://www.w3.org/2001/XMLSchema#double>"
        );
        assert_eq!(BuiltinName::EncodeForUri.to_string(), "encode_for_uri");
    }
}
