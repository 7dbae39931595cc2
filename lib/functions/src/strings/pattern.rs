use crate::{ScalarBinaryRdfOp, ScalarQuaternaryRdfOp, ScalarTernaryRdfOp};
use rdf_loom_model::{
    Boolean, OwnedStringLiteral, SimpleLiteralRef, StringLiteralRef, ThinError, ThinResult,
};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// `REGEX(text, pattern [, flags])`.
#[derive(Debug, Default)]
pub struct RegexRdfOp;

impl RegexRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for RegexRdfOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        text: Self::ArgLhs<'data>,
        pattern: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.value, None)?;
        Ok(regex.is_match(text.0).into())
    }
}

impl ScalarTernaryRdfOp for RegexRdfOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        flags: Self::Arg2<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.value, Some(flags.value))?;
        Ok(regex.is_match(text.0).into())
    }
}

/// `REPLACE(text, pattern, replacement [, flags])`.
#[derive(Debug, Default)]
pub struct ReplaceRdfOp;

impl ReplaceRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarTernaryRdfOp for ReplaceRdfOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        replacement: Self::Arg2<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.value, None)?;
        Ok(replace(&regex, text, replacement.value))
    }
}

impl ScalarQuaternaryRdfOp for ReplaceRdfOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Arg3<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        replacement: Self::Arg2<'data>,
        flags: Self::Arg3<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.value, Some(flags.value))?;
        Ok(replace(&regex, text, replacement.value))
    }
}

fn replace(regex: &Regex, text: StringLiteralRef<'_>, replacement: &str) -> OwnedStringLiteral {
    let result = match regex.replace_all(text.0, replacement) {
        Cow::Owned(replaced) => replaced,
        Cow::Borrowed(_) => text.0.to_owned(),
    };
    OwnedStringLiteral(result, text.1.map(ToOwned::to_owned))
}

/// Compiles an XPath regular expression with the flags `s`, `m`, `i`, `x` and `q`.
pub fn compile_pattern(pattern: &str, flags: Option<&str>) -> ThinResult<Regex> {
    const REGEX_SIZE_LIMIT: usize = 1_000_000;

    let mut pattern = Cow::Borrowed(pattern);
    let flags = flags.unwrap_or_default();
    if flags.contains('q') {
        pattern = regex::escape(&pattern).into();
    }
    let mut regex_builder = RegexBuilder::new(&pattern);
    regex_builder.size_limit(REGEX_SIZE_LIMIT);
    for flag in flags.chars() {
        match flag {
            's' => {
                regex_builder.dot_matches_new_line(true);
            }
            'm' => {
                regex_builder.multi_line(true);
            }
            'i' => {
                regex_builder.case_insensitive(true);
            }
            'x' => {
                regex_builder.ignore_whitespace(true);
            }
            'q' => (),
            _ => return ThinError::expected(),
        }
    }
    regex_builder.build().map_err(|_| ThinError::default())
}
