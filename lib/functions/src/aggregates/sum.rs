use crate::aggregates::Accumulator;
use crate::numeric_add;
use rdf_loom_model::{Integer, Numeric, Term, TermRef, ThinError, ThinResult, TypedValue, TypedValueRef};

/// `SUM` of numeric values. A single non-numeric or unbound value makes the whole sum an error.
#[derive(Debug)]
pub struct SumAccumulator {
    sum: ThinResult<Numeric>,
}

impl SumAccumulator {
    pub fn new() -> Self {
        Self {
            sum: Ok(Numeric::Integer(Integer::from(0))),
        }
    }
}

impl Default for SumAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for SumAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if let Ok(sum) = self.sum {
            self.sum = match value.map(TypedValueRef::from) {
                Some(TypedValueRef::NumericLiteral(value)) => numeric_add(sum, value),
                _ => ThinError::expected(),
            };
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        let sum = self.sum?;
        Ok(TypedValue::from(sum).into_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;
    use rdf_loom_model::Literal;

    #[test]
    fn sum_promotes_types() {
        let mut sum = SumAccumulator::new();
        sum.update(Some(Literal::new_typed_literal("1", xsd::INTEGER).as_ref().into()));
        sum.update(Some(Literal::new_typed_literal("1.5", xsd::DECIMAL).as_ref().into()));
        assert_eq!(
            sum.evaluate(),
            Ok(Literal::new_typed_literal("2.5", xsd::DECIMAL).into())
        );
    }

    #[test]
    fn empty_sum_is_zero() {
        assert_eq!(
            SumAccumulator::new().evaluate(),
            Ok(Literal::new_typed_literal("0", xsd::INTEGER).into())
        );
    }

    #[test]
    fn non_numeric_values_are_errors() {
        let mut sum = SumAccumulator::new();
        sum.update(Some(Literal::new_typed_literal("1", xsd::INTEGER).as_ref().into()));
        sum.update(Some(Literal::new_simple_literal("one").as_ref().into()));
        sum.update(Some(Literal::new_typed_literal("1", xsd::INTEGER).as_ref().into()));
        assert!(sum.evaluate().is_err());
    }
}
