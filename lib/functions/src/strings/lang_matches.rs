use crate::ScalarBinaryRdfOp;
use itertools::{EitherOrBoth, Itertools};
use rdf_loom_model::{Boolean, SimpleLiteralRef, ThinResult};

/// `LANGMATCHES(tag, range)` using basic filtering from RFC 4647.
#[derive(Debug, Default)]
pub struct LangMatchesRdfOp;

impl LangMatchesRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for LangMatchesRdfOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        tag: Self::ArgLhs<'data>,
        range: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let matches = if range.value == "*" {
            !tag.value.is_empty()
        } else {
            !range
                .value
                .split('-')
                .zip_longest(tag.value.split('-'))
                .any(|parts| match parts {
                    EitherOrBoth::Both(range_subtag, language_subtag) => {
                        !range_subtag.eq_ignore_ascii_case(language_subtag)
                    }
                    EitherOrBoth::Left(_) => true,
                    EitherOrBoth::Right(_) => false,
                })
        };
        Ok(matches.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang_matches(tag: &str, range: &str) -> bool {
        LangMatchesRdfOp::new()
            .evaluate(SimpleLiteralRef::new(tag), SimpleLiteralRef::new(range))
            .map(bool::from)
            .unwrap()
    }

    #[test]
    fn basic_filtering() {
        assert!(lang_matches("en-US", "en"));
        assert!(lang_matches("EN", "en"));
        assert!(!lang_matches("en", "en-US"));
        assert!(!lang_matches("fr", "en"));
        assert!(lang_matches("fr", "*"));
        assert!(!lang_matches("", "*"));
    }
}
