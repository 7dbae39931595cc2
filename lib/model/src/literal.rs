use crate::{ThinError, ThinResult};
use std::cmp::Ordering;

/// A literal without a language tag and with the datatype `xsd:string`.
#[derive(Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub struct SimpleLiteral {
    pub value: String,
}

impl SimpleLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_ref(&self) -> SimpleLiteralRef<'_> {
        SimpleLiteralRef { value: &self.value }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct SimpleLiteralRef<'value> {
    pub value: &'value str,
}

impl<'value> SimpleLiteralRef<'value> {
    pub fn new(value: &'value str) -> Self {
        Self { value }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_owned(self) -> SimpleLiteral {
        SimpleLiteral {
            value: self.value.to_owned(),
        }
    }
}

/// A literal with a language tag (`rdf:langString`).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct LanguageString {
    pub value: String,
    pub language: String,
}

impl LanguageString {
    pub fn as_ref(&self) -> LanguageStringRef<'_> {
        LanguageStringRef {
            value: &self.value,
            language: &self.language,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LanguageStringRef<'value> {
    pub value: &'value str,
    pub language: &'value str,
}

impl LanguageStringRef<'_> {
    pub fn into_owned(self) -> LanguageString {
        LanguageString {
            value: self.value.to_owned(),
            language: self.language.to_owned(),
        }
    }
}

impl PartialOrd for LanguageStringRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.cmp(other.value) {
            Ordering::Equal => self.language.partial_cmp(other.language),
            ordering => Some(ordering),
        }
    }
}

/// A reference to a string literal in RDF, consisting of a value and an optional language tag.
///
/// String functions accept simple literals and language-tagged strings alike.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StringLiteralRef<'value>(pub &'value str, pub Option<&'value str>);

impl StringLiteralRef<'_> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }
}

/// An owned string literal in RDF, consisting of a value and an optional language tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OwnedStringLiteral(pub String, pub Option<String>);

impl OwnedStringLiteral {
    pub fn new(value: impl Into<String>, language: Option<String>) -> OwnedStringLiteral {
        OwnedStringLiteral(value.into(), language)
    }
}

/// The arguments of a binary string function after the
/// [argument compatibility rules](https://www.w3.org/TR/sparql11-query/#func-arg-compatibility)
/// have been checked.
pub struct CompatibleStringArgs<'data> {
    pub lhs: &'data str,
    pub rhs: &'data str,
    pub language: Option<&'data str>,
}

impl<'data> CompatibleStringArgs<'data> {
    /// Checks whether two [StringLiteralRef] are compatible and if they are return a new
    /// [CompatibleStringArgs].
    pub fn try_from(
        lhs: StringLiteralRef<'data>,
        rhs: StringLiteralRef<'data>,
    ) -> ThinResult<CompatibleStringArgs<'data>> {
        let is_compatible = rhs.1.is_none() || lhs.1 == rhs.1;

        if !is_compatible {
            return ThinError::expected();
        }

        Ok(CompatibleStringArgs {
            lhs: lhs.0,
            rhs: rhs.0,
            language: lhs.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatible_string_args() {
        let plain = StringLiteralRef("abc", None);
        let english = StringLiteralRef("abc", Some("en"));
        let french = StringLiteralRef("abc", Some("fr"));

        assert!(CompatibleStringArgs::try_from(plain, plain).is_ok());
        assert!(CompatibleStringArgs::try_from(english, plain).is_ok());
        assert!(CompatibleStringArgs::try_from(english, english).is_ok());
        assert!(CompatibleStringArgs::try_from(plain, english).is_err());
        assert!(CompatibleStringArgs::try_from(english, french).is_err());
    }

    #[test]
    fn string_length_counts_chars() {
        assert_eq!(StringLiteralRef("\u{e9}t\u{e9}", None).len(), 3);
    }
}
