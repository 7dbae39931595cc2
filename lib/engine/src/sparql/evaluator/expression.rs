use crate::sparql::error::QueryEvaluationError;
use crate::sparql::evaluator::SimpleEvaluator;
use crate::sparql::Bindings;
use rdf_loom_functions::dispatch::{dispatch_binary, dispatch_unary, evaluate_builtin};
use rdf_loom_functions::{
    values_equal, AddRdfOp, CompareRdfOp, ComparisonKind, DivRdfOp, EqualRdfOp, FunctionName,
    MulRdfOp, SubRdfOp, UnaryMinusRdfOp, UnaryPlusRdfOp,
};
use rdf_loom_logical::algebra::Expression;
use rdf_loom_model::{Literal, Term, ThinError, TypedValueRef};

/// The error of an expression evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    /// A SPARQL error, e.g., a type error or an unbound variable. The operator that evaluates
    /// the expression decides what it means.
    #[error(transparent)]
    Expected(#[from] ThinError),
    /// An error that aborts the evaluation.
    #[error(transparent)]
    Fault(#[from] QueryEvaluationError),
}

type ExpressionResult<T> = Result<T, ExpressionError>;

impl SimpleEvaluator {
    pub(crate) fn evaluate_expression_term(
        &self,
        expression: &Expression,
        bindings: &Bindings,
    ) -> ExpressionResult<Term> {
        match expression {
            Expression::NamedNode(node) => Ok(node.clone().into()),
            Expression::Literal(literal) => Ok(literal.clone().into()),
            Expression::Variable(variable) => match bindings.lookup(variable) {
                Some(term) => Ok(term.clone()),
                None => Err(ThinError::default().into()),
            },
            Expression::Or(lhs, rhs) => {
                let lhs = self.effective_boolean_value(lhs, bindings);
                if matches!(lhs, Ok(true)) {
                    return Ok(Literal::from(true).into());
                }
                let lhs = expected_only(lhs)?;
                match self.effective_boolean_value(rhs, bindings)? {
                    true => Ok(Literal::from(true).into()),
                    false => Ok(Literal::from(lhs.ok_or(ThinError::default())?).into()),
                }
            }
            Expression::And(lhs, rhs) => {
                let lhs = self.effective_boolean_value(lhs, bindings);
                if matches!(lhs, Ok(false)) {
                    return Ok(Literal::from(false).into());
                }
                let lhs = expected_only(lhs)?;
                match self.effective_boolean_value(rhs, bindings)? {
                    false => Ok(Literal::from(false).into()),
                    true => Ok(Literal::from(lhs.ok_or(ThinError::default())?).into()),
                }
            }
            Expression::Equal(lhs, rhs) => self.binary(&EqualRdfOp::new(), lhs, rhs, bindings),
            Expression::Greater(lhs, rhs) => self.compare(ComparisonKind::Greater, lhs, rhs, bindings),
            Expression::GreaterOrEqual(lhs, rhs) => {
                self.compare(ComparisonKind::GreaterOrEqual, lhs, rhs, bindings)
            }
            Expression::Less(lhs, rhs) => self.compare(ComparisonKind::Less, lhs, rhs, bindings),
            Expression::LessOrEqual(lhs, rhs) => {
                self.compare(ComparisonKind::LessOrEqual, lhs, rhs, bindings)
            }
            Expression::In(needle, haystack) => {
                let needle = self.evaluate_expression_term(needle, bindings)?;
                let mut error = None;
                for item in haystack {
                    let result = self
                        .evaluate_expression_term(item, bindings)
                        .and_then(|item| {
                            Ok(values_equal(
                                TypedValueRef::from(needle.as_ref()),
                                TypedValueRef::from(item.as_ref()),
                            )?)
                        });
                    match result {
                        Ok(true) => return Ok(Literal::from(true).into()),
                        Ok(false) => {}
                        Err(ExpressionError::Expected(e)) => error = Some(e),
                        Err(fault) => return Err(fault),
                    }
                }
                match error {
                    Some(error) => Err(error.into()),
                    None => Ok(Literal::from(false).into()),
                }
            }
            Expression::Add(lhs, rhs) => self.binary(&AddRdfOp::new(), lhs, rhs, bindings),
            Expression::Subtract(lhs, rhs) => self.binary(&SubRdfOp::new(), lhs, rhs, bindings),
            Expression::Multiply(lhs, rhs) => self.binary(&MulRdfOp::new(), lhs, rhs, bindings),
            Expression::Divide(lhs, rhs) => self.binary(&DivRdfOp::new(), lhs, rhs, bindings),
            Expression::UnaryPlus(inner) => {
                let inner = self.evaluate_expression_term(inner, bindings)?;
                Ok(dispatch_unary(&UnaryPlusRdfOp::new(), inner.as_ref())?)
            }
            Expression::UnaryMinus(inner) => {
                let inner = self.evaluate_expression_term(inner, bindings)?;
                Ok(dispatch_unary(&UnaryMinusRdfOp::new(), inner.as_ref())?)
            }
            Expression::Not(inner) => {
                let value = self.effective_boolean_value(inner, bindings)?;
                Ok(Literal::from(!value).into())
            }
            Expression::Exists(pattern) => {
                let seed = bindings.forget(&pattern.mentioned_variables());
                let exists = match self.evaluate_pattern(pattern, seed).next() {
                    Some(Ok(_)) => true,
                    Some(Err(error)) => return Err(error.into()),
                    None => false,
                };
                Ok(Literal::from(exists).into())
            }
            Expression::Bound(variable) => Ok(Literal::from(bindings.contains(variable)).into()),
            Expression::If(condition, then, otherwise) => {
                if self.effective_boolean_value(condition, bindings)? {
                    self.evaluate_expression_term(then, bindings)
                } else {
                    self.evaluate_expression_term(otherwise, bindings)
                }
            }
            Expression::Coalesce(alternatives) => {
                for alternative in alternatives {
                    match self.evaluate_expression_term(alternative, bindings) {
                        Ok(term) => return Ok(term),
                        Err(ExpressionError::Expected(_)) => {}
                        Err(fault) => return Err(fault),
                    }
                }
                Err(ThinError::default().into())
            }
            Expression::FunctionCall(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.evaluate_expression_term(arg, bindings))
                    .collect::<ExpressionResult<Vec<_>>>()?;
                match name {
                    FunctionName::Builtin(builtin) => {
                        let args = args.iter().map(Term::as_ref).collect::<Vec<_>>();
                        Ok(evaluate_builtin(*builtin, &args, &self.context)?)
                    }
                    FunctionName::Custom(name) => {
                        let Some(function) = self.custom_functions.get(name) else {
                            tracing::debug!(function = %name, "Call to an unknown function");
                            return Err(ThinError::default().into());
                        };
                        function(&args).ok_or_else(|| ThinError::default().into())
                    }
                }
            }
        }
    }

    pub(crate) fn effective_boolean_value(
        &self,
        expression: &Expression,
        bindings: &Bindings,
    ) -> ExpressionResult<bool> {
        let term = self.evaluate_expression_term(expression, bindings)?;
        Ok(TypedValueRef::from(term.as_ref()).effective_boolean_value()?)
    }

    fn binary<Op>(
        &self,
        op: &Op,
        lhs: &Expression,
        rhs: &Expression,
        bindings: &Bindings,
    ) -> ExpressionResult<Term>
    where
        Op: rdf_loom_functions::ScalarBinaryRdfOp,
        for<'data> Op::Result<'data>: rdf_loom_functions::dispatch::IntoTerm,
    {
        let lhs = self.evaluate_expression_term(lhs, bindings)?;
        let rhs = self.evaluate_expression_term(rhs, bindings)?;
        Ok(dispatch_binary(op, lhs.as_ref(), rhs.as_ref())?)
    }

    fn compare(
        &self,
        kind: ComparisonKind,
        lhs: &Expression,
        rhs: &Expression,
        bindings: &Bindings,
    ) -> ExpressionResult<Term> {
        self.binary(&CompareRdfOp::new(kind), lhs, rhs, bindings)
    }
}

/// Keeps expected errors as [None] and returns faults.
fn expected_only(result: ExpressionResult<bool>) -> ExpressionResult<Option<bool>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ExpressionError::Expected(_)) => Ok(None),
        Err(fault) => Err(fault),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::dataset::DatasetView;
    use rdf_loom_functions::dispatch::FunctionContext;
    use rdf_loom_model::{DateTime, Variable};
    use rdf_loom_storage::memory::MemQuadStorage;
    use rustc_hash::FxHashMap;
    use std::str::FromStr;
    use std::sync::Arc;

    fn evaluator() -> SimpleEvaluator {
        let dataset = DatasetView::new(Arc::new(MemQuadStorage::new()), None, false);
        let now = DateTime::from_str("2020-01-01T00:00:00Z").unwrap();
        SimpleEvaluator::new(
            dataset,
            FunctionContext::new(None, now),
            FxHashMap::default(),
        )
    }

    fn int(value: i64) -> Expression {
        Expression::Literal(Literal::from(value))
    }

    fn unbound() -> Expression {
        Expression::Variable(Variable::new_unchecked("unbound"))
    }

    fn evaluate(expression: &Expression) -> Option<Term> {
        evaluator()
            .evaluate_expression(expression, &Bindings::new())
            .unwrap()
    }

    #[test]
    fn or_recovers_from_an_error() {
        let error_or_true = Expression::Or(
            Box::new(unbound()),
            Box::new(Expression::Literal(true.into())),
        );
        let error_or_false = Expression::Or(
            Box::new(unbound()),
            Box::new(Expression::Literal(false.into())),
        );
        assert_eq!(evaluate(&error_or_true), Some(Literal::from(true).into()));
        assert_eq!(evaluate(&error_or_false), None);
    }

    #[test]
    fn and_recovers_from_an_error() {
        let error_and_false = Expression::And(
            Box::new(unbound()),
            Box::new(Expression::Literal(false.into())),
        );
        assert_eq!(evaluate(&error_and_false), Some(Literal::from(false).into()));
    }

    #[test]
    fn in_is_an_error_if_no_member_matches_and_one_fails() {
        let found = Expression::In(Box::new(int(2)), vec![unbound(), int(2)]);
        let not_found = Expression::In(Box::new(int(2)), vec![unbound(), int(3)]);
        let empty = Expression::In(Box::new(int(2)), Vec::new());
        assert_eq!(evaluate(&found), Some(Literal::from(true).into()));
        assert_eq!(evaluate(&not_found), None);
        assert_eq!(evaluate(&empty), Some(Literal::from(false).into()));
    }

    #[test]
    fn coalesce_skips_errors() {
        let coalesce = Expression::Coalesce(vec![unbound(), int(1), int(2)]);
        assert_eq!(evaluate(&coalesce), Some(Literal::from(1).into()));
        assert_eq!(evaluate(&Expression::Coalesce(vec![unbound()])), None);
    }

    #[test]
    fn unknown_custom_function_is_an_error() {
        let call = Expression::FunctionCall(
            FunctionName::Custom(rdf_loom_model::NamedNode::new_unchecked(
                "http://example.com/unknown",
            )),
            Vec::new(),
        );
        assert_eq!(evaluate(&call), None);
    }

    #[test]
    fn comparison_of_incompatible_values_is_an_error() {
        let comparison = Expression::Less(
            Box::new(int(1)),
            Box::new(Expression::Literal(Literal::new_simple_literal("a"))),
        );
        assert_eq!(evaluate(&comparison), None);
        let comparison = Expression::Less(Box::new(int(1)), Box::new(int(2)));
        assert_eq!(evaluate(&comparison), Some(Literal::from(true).into()));
    }
}
