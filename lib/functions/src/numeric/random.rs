use crate::ScalarNullaryRdfOp;
use rdf_loom_model::{Double, Numeric, ThinResult};

/// `RAND()`: a pseudo-random `xsd:double` in `[0, 1)`.
#[derive(Debug, Default)]
pub struct RandRdfOp;

impl RandRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarNullaryRdfOp for RandRdfOp {
    type Result = Numeric;

    fn evaluate(&self) -> ThinResult<Self::Result> {
        Ok(Numeric::Double(Double::from(rand::random::<f64>())))
    }
}
