use crate::ScalarUnaryRdfOp;
use rdf_loom_model::{Integer, StringLiteralRef, ThinResult};

/// `STRLEN` counts characters, not bytes.
#[derive(Debug, Default)]
pub struct StrLenRdfOp;

impl StrLenRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for StrLenRdfOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        let length = i64::try_from(value.len())?;
        Ok(Integer::from(length))
    }
}
