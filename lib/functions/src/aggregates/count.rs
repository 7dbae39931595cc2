use crate::aggregates::Accumulator;
use rdf_loom_model::{Integer, Numeric, Term, TermRef, ThinResult, TypedValue};

/// `COUNT(expr)` counts the bound values of `expr`.
#[derive(Debug, Default)]
pub struct CountAccumulator {
    count: i64,
}

impl CountAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for CountAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if value.is_some() {
            self.count += 1;
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        Ok(TypedValue::from(Numeric::Integer(Integer::from(self.count))).into_term())
    }
}
