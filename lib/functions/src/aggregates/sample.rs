use crate::aggregates::Accumulator;
use rdf_loom_model::{Term, TermRef, ThinError, ThinResult};

/// `SAMPLE` returns the first bound value.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    value: Option<Term>,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for SampleAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if self.value.is_none() {
            self.value = value.map(TermRef::into_owned);
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        self.value.clone().ok_or(ThinError::default())
    }
}
