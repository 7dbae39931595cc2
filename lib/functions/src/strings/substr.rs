use crate::{ScalarBinaryRdfOp, ScalarTernaryRdfOp};
use crate::strings::search::with_language;
use rdf_loom_model::{Integer, StringLiteralRef, ThinError, ThinResult, TypedValueRef};

/// `SUBSTR` with 1-based character positions.
#[derive(Debug, Default)]
pub struct SubStrRdfOp;

impl SubStrRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for SubStrRdfOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = Integer;
    type Result<'data> = TypedValueRef<'data>;

    fn evaluate<'data>(
        &self,
        source: Self::ArgLhs<'data>,
        starting_loc: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        evaluate_substr(source, starting_loc, None)
    }
}

impl ScalarTernaryRdfOp for SubStrRdfOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = Integer;
    type Arg2<'data> = Integer;
    type Result<'data> = TypedValueRef<'data>;

    fn evaluate<'data>(
        &self,
        source: Self::Arg0<'data>,
        starting_loc: Self::Arg1<'data>,
        length: Self::Arg2<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        evaluate_substr(source, starting_loc, Some(length))
    }
}

fn evaluate_substr(
    source: StringLiteralRef<'_>,
    starting_loc: Integer,
    length: Option<Integer>,
) -> ThinResult<TypedValueRef<'_>> {
    let start = i64::from(starting_loc);
    let end = match length {
        Some(length) => Some(
            start
                .checked_add(i64::from(length))
                .ok_or(ThinError::default())?,
        ),
        None => None,
    };

    // Character positions in [start, end) that exist in the string.
    let first = usize::try_from(start.max(1) - 1)?;
    let last = match end {
        Some(end) if end <= 1 => Some(0),
        Some(end) => Some(usize::try_from(end - 1)?),
        None => None,
    };

    let mut indices = source.0.char_indices().map(|(index, _)| index);
    let byte_start = indices.nth(first).unwrap_or(source.0.len());
    let byte_end = match last {
        Some(last) if last <= first => byte_start,
        Some(last) => source
            .0
            .char_indices()
            .map(|(index, _)| index)
            .nth(last)
            .unwrap_or(source.0.len()),
        None => source.0.len(),
    };

    Ok(with_language(&source.0[byte_start..byte_end], source.1))
}
