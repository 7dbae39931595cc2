use crate::ScalarUnaryRdfOp;
use rdf_loom_model::{OwnedStringLiteral, StringLiteralRef, ThinResult};

#[derive(Debug, Default)]
pub struct UCaseRdfOp;

impl UCaseRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for UCaseRdfOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        Ok(OwnedStringLiteral(
            value.0.to_uppercase(),
            value.1.map(ToOwned::to_owned),
        ))
    }
}

#[derive(Debug, Default)]
pub struct LCaseRdfOp;

impl LCaseRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for LCaseRdfOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        Ok(OwnedStringLiteral(
            value.0.to_lowercase(),
            value.1.map(ToOwned::to_owned),
        ))
    }
}
