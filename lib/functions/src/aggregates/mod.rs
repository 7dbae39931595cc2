//! Accumulators for the SPARQL set functions.
//!
//! An accumulator is fed the value of the aggregated expression for every solution of a group.
//! `None` stands for an unbound value or an evaluation error. If an accumulator cannot produce a
//! value, [Accumulator::evaluate] returns a [ThinError] and the aggregate stays unbound.

mod avg;
mod count;
mod group_concat;
mod min_max;
mod sample;
mod sum;

pub use avg::AvgAccumulator;
pub use count::CountAccumulator;
pub use group_concat::GroupConcatAccumulator;
pub use min_max::{MaxAccumulator, MinAccumulator};
pub use sample::SampleAccumulator;
pub use sum::SumAccumulator;

use rdf_loom_model::{Term, TermRef, ThinResult};
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// The aggregate functions of SPARQL 1.1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
    GroupConcat { separator: Option<String> },
}

impl Display for AggregateFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateFunction::Count => f.write_str("count"),
            AggregateFunction::Sum => f.write_str("sum"),
            AggregateFunction::Avg => f.write_str("avg"),
            AggregateFunction::Min => f.write_str("min"),
            AggregateFunction::Max => f.write_str("max"),
            AggregateFunction::Sample => f.write_str("sample"),
            AggregateFunction::GroupConcat { .. } => f.write_str("group_concat"),
        }
    }
}

pub trait Accumulator: Send {
    fn update(&mut self, value: Option<TermRef<'_>>);

    fn evaluate(&self) -> ThinResult<Term>;
}

/// Creates a fresh accumulator. With `distinct`, repeated values are only accumulated once.
pub fn create_accumulator(function: &AggregateFunction, distinct: bool) -> Box<dyn Accumulator> {
    let accumulator: Box<dyn Accumulator> = match function {
        AggregateFunction::Count => Box::new(CountAccumulator::new()),
        AggregateFunction::Sum => Box::new(SumAccumulator::new()),
        AggregateFunction::Avg => Box::new(AvgAccumulator::new()),
        AggregateFunction::Min => Box::new(MinAccumulator::new()),
        AggregateFunction::Max => Box::new(MaxAccumulator::new()),
        AggregateFunction::Sample => Box::new(SampleAccumulator::new()),
        AggregateFunction::GroupConcat { separator } => Box::new(GroupConcatAccumulator::new(
            separator.clone().unwrap_or_else(|| " ".to_owned()),
        )),
    };
    if distinct {
        Box::new(DistinctAccumulator::new(accumulator))
    } else {
        accumulator
    }
}

struct DistinctAccumulator {
    seen: FxHashSet<Option<Term>>,
    inner: Box<dyn Accumulator>,
}

impl DistinctAccumulator {
    fn new(inner: Box<dyn Accumulator>) -> Self {
        Self {
            seen: FxHashSet::default(),
            inner,
        }
    }
}

impl Accumulator for DistinctAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if self.seen.insert(value.map(TermRef::into_owned)) {
            self.inner.update(value);
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        self.inner.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::vocab::xsd;
    use rdf_loom_model::Literal;

    fn integer(value: i64) -> Term {
        Literal::new_typed_literal(value.to_string(), xsd::INTEGER).into()
    }

    #[test]
    fn distinct_skips_repeated_values() {
        let mut count = create_accumulator(&AggregateFunction::Count, true);
        for value in [1, 2, 2, 3, 3, 3] {
            count.update(Some(integer(value).as_ref()));
        }
        assert_eq!(count.evaluate(), Ok(integer(3)));

        let mut sum = create_accumulator(&AggregateFunction::Sum, true);
        for value in [5, 5, 5] {
            sum.update(Some(integer(value).as_ref()));
        }
        assert_eq!(sum.evaluate(), Ok(integer(5)));
    }

    #[test]
    fn group_concat_uses_a_space_by_default() {
        let mut concat =
            create_accumulator(&AggregateFunction::GroupConcat { separator: None }, false);
        concat.update(Some(Literal::new_simple_literal("a").as_ref().into()));
        concat.update(Some(Literal::new_simple_literal("b").as_ref().into()));
        assert_eq!(
            concat.evaluate(),
            Ok(Literal::new_simple_literal("a b").into())
        );
    }
}
