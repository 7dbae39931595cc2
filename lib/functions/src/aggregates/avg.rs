use crate::aggregates::Accumulator;
use crate::{numeric_add, DivRdfOp, ScalarBinaryRdfOp};
use rdf_loom_model::{
    Integer, Numeric, Term, TermRef, ThinError, ThinResult, TypedValue, TypedValueRef,
};

/// `AVG` of numeric values. The average of the empty set is `0`.
#[derive(Debug)]
pub struct AvgAccumulator {
    sum: ThinResult<Numeric>,
    count: i64,
}

impl AvgAccumulator {
    pub fn new() -> Self {
        Self {
            sum: Ok(Numeric::Integer(Integer::from(0))),
            count: 0,
        }
    }
}

impl Default for AvgAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for AvgAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if let Ok(sum) = self.sum {
            self.sum = match value.map(TypedValueRef::from) {
                Some(TypedValueRef::NumericLiteral(value)) => numeric_add(sum, value),
                _ => ThinError::expected(),
            };
            self.count += 1;
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        let sum = self.sum?;
        if self.count == 0 {
            return Ok(TypedValue::from(Numeric::Integer(Integer::from(0))).into_term());
        }
        let count = Numeric::Integer(Integer::from(self.count));
        let average = DivRdfOp::new().evaluate(sum, count)?;
        Ok(TypedValue::from(average).into_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;
    use rdf_loom_model::Literal;

    #[test]
    fn average_of_integers_is_a_decimal() {
        let mut avg = AvgAccumulator::new();
        for value in ["1", "2"] {
            avg.update(Some(Literal::new_typed_literal(value, xsd::INTEGER).as_ref().into()));
        }
        assert_eq!(
            avg.evaluate(),
            Ok(Literal::new_typed_literal("1.5", xsd::DECIMAL).into())
        );
    }

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(
            AvgAccumulator::new().evaluate(),
            Ok(Literal::new_typed_literal("0", xsd::INTEGER).into())
        );
    }

    #[test]
    fn unbound_values_are_errors() {
        let mut avg = AvgAccumulator::new();
        avg.update(None);
        assert!(avg.evaluate().is_err());
    }
}
