use crate::aggregates::Accumulator;
use rdf_loom_model::order::compare_for_ordering;
use rdf_loom_model::{Term, TermRef, ThinError, ThinResult};
use std::cmp::Ordering;

/// `MIN` and `MAX` use the same total order as `ORDER BY`, so values of different types can
/// be mixed. Unbound values are skipped.
#[derive(Debug)]
struct Extremum {
    keep: Ordering,
    value: Option<Term>,
}

impl Extremum {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        let Some(value) = value else {
            return;
        };
        let replace = match &self.value {
            None => true,
            Some(current) => compare_for_ordering(Some(value), Some(current.as_ref())) == self.keep,
        };
        if replace {
            self.value = Some(value.into_owned());
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        self.value.clone().ok_or(ThinError::default())
    }
}

#[derive(Debug)]
pub struct MinAccumulator(Extremum);

impl MinAccumulator {
    pub fn new() -> Self {
        Self(Extremum {
            keep: Ordering::Less,
            value: None,
        })
    }
}

impl Default for MinAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for MinAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        self.0.update(value);
    }

    fn evaluate(&self) -> ThinResult<Term> {
        self.0.evaluate()
    }
}

#[derive(Debug)]
pub struct MaxAccumulator(Extremum);

impl MaxAccumulator {
    pub fn new() -> Self {
        Self(Extremum {
            keep: Ordering::Greater,
            value: None,
        })
    }
}

impl Default for MaxAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for MaxAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        self.0.update(value);
    }

    fn evaluate(&self) -> ThinResult<Term> {
        self.0.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;
    use rdf_loom_model::{Literal, NamedNode};

    #[test]
    fn min_and_max_of_numbers() {
        let values: Vec<Term> = ["10", "2", "33"]
            .into_iter()
            .map(|value| Literal::new_typed_literal(value, xsd::INTEGER).into())
            .collect();
        let mut min = MinAccumulator::new();
        let mut max = MaxAccumulator::new();
        for value in &values {
            min.update(Some(value.as_ref()));
            max.update(Some(value.as_ref()));
        }
        assert_eq!(min.evaluate(), Ok(values[1].clone()));
        assert_eq!(max.evaluate(), Ok(values[2].clone()));
    }

    #[test]
    fn iris_sort_before_literals() {
        let iri: Term = NamedNode::new_unchecked("http://example.com/").into();
        let literal: Term = Literal::new_simple_literal("a").into();
        let mut min = MinAccumulator::new();
        min.update(Some(literal.as_ref()));
        min.update(None);
        min.update(Some(iri.as_ref()));
        assert_eq!(min.evaluate(), Ok(iri));
    }

    #[test]
    fn empty_groups_have_no_minimum() {
        assert!(MinAccumulator::new().evaluate().is_err());
    }
}
