use crate::algebra::{AggregateExpression, Expression};
use crate::error::TranslationError;
use crate::translate::Translator;
use rdf_loom_functions::aggregates::AggregateFunction;
use rdf_loom_functions::{BuiltinName, FunctionName};
use rdf_loom_parser::ast::{AggregateAst, AggregateFunctionAst, ArithmeticOp, CompareOp, ExprAst};
use std::sync::Arc;

impl Translator {
    pub(super) fn translate_expression(
        &mut self,
        expr: &ExprAst,
    ) -> Result<Expression, TranslationError> {
        Ok(match expr {
            ExprAst::Or(lhs, rhs) => Expression::Or(
                Box::new(self.translate_expression(lhs)?),
                Box::new(self.translate_expression(rhs)?),
            ),
            ExprAst::And(lhs, rhs) => Expression::And(
                Box::new(self.translate_expression(lhs)?),
                Box::new(self.translate_expression(rhs)?),
            ),
            ExprAst::Compare(op, lhs, rhs) => {
                let lhs = Box::new(self.translate_expression(lhs)?);
                let rhs = Box::new(self.translate_expression(rhs)?);
                match op {
                    CompareOp::Eq => Expression::Equal(lhs, rhs),
                    CompareOp::NotEq => Expression::Not(Box::new(Expression::Equal(lhs, rhs))),
                    CompareOp::Lt => Expression::Less(lhs, rhs),
                    CompareOp::Gt => Expression::Greater(lhs, rhs),
                    CompareOp::LtEq => Expression::LessOrEqual(lhs, rhs),
                    CompareOp::GtEq => Expression::GreaterOrEqual(lhs, rhs),
                }
            }
            ExprAst::In {
                needle,
                haystack,
                negated,
            } => {
                let needle = Box::new(self.translate_expression(needle)?);
                let haystack = self.translate_expressions(haystack)?;
                let expression = Expression::In(needle, haystack);
                if *negated {
                    Expression::Not(Box::new(expression))
                } else {
                    expression
                }
            }
            ExprAst::Arithmetic(op, lhs, rhs) => {
                let lhs = Box::new(self.translate_expression(lhs)?);
                let rhs = Box::new(self.translate_expression(rhs)?);
                match op {
                    ArithmeticOp::Add => Expression::Add(lhs, rhs),
                    ArithmeticOp::Sub => Expression::Subtract(lhs, rhs),
                    ArithmeticOp::Mul => Expression::Multiply(lhs, rhs),
                    ArithmeticOp::Div => Expression::Divide(lhs, rhs),
                }
            }
            ExprAst::UnaryPlus(inner) => {
                Expression::UnaryPlus(Box::new(self.translate_expression(inner)?))
            }
            ExprAst::UnaryMinus(inner) => {
                Expression::UnaryMinus(Box::new(self.translate_expression(inner)?))
            }
            ExprAst::Not(inner) => Expression::Not(Box::new(self.translate_expression(inner)?)),
            ExprAst::Var(var) => Expression::Variable(Self::variable(var)),
            ExprAst::Iri(iri) => Expression::NamedNode(self.named_node(iri)?),
            ExprAst::Literal(literal) => Expression::Literal(self.literal(literal)?),
            ExprAst::Builtin { name, args, span } => match (name.as_str(), args.as_slice()) {
                ("BOUND", [ExprAst::Var(var)]) => Expression::Bound(Self::variable(var)),
                ("IF", [condition, then, otherwise]) => Expression::If(
                    Box::new(self.translate_expression(condition)?),
                    Box::new(self.translate_expression(then)?),
                    Box::new(self.translate_expression(otherwise)?),
                ),
                ("COALESCE", args) => Expression::Coalesce(self.translate_expressions(args)?),
                (name, args) => {
                    let builtin = BuiltinName::from_keyword(name).map_err(|_| {
                        TranslationError::UnknownFunction {
                            name: name.to_owned(),
                            span: *span,
                        }
                    })?;
                    Expression::FunctionCall(
                        FunctionName::Builtin(builtin),
                        self.translate_expressions(args)?,
                    )
                }
            },
            ExprAst::FunctionCall {
                name,
                distinct,
                args,
            } => {
                let iri = self.named_node(name)?;
                if *distinct {
                    // DISTINCT is only meaningful for custom aggregates.
                    return Err(TranslationError::UnknownFunction {
                        name: iri.into_string(),
                        span: name.span(),
                    });
                }
                let function = match BuiltinName::from_cast_iri(iri.as_ref()) {
                    Some(cast) => FunctionName::Builtin(cast),
                    None => FunctionName::Custom(iri),
                };
                Expression::FunctionCall(function, self.translate_expressions(args)?)
            }
            ExprAst::Exists(pattern) => {
                Expression::Exists(Arc::new(self.translate_group(pattern)?))
            }
            ExprAst::NotExists(pattern) => Expression::Not(Box::new(Expression::Exists(
                Arc::new(self.translate_group(pattern)?),
            ))),
            ExprAst::Aggregate(aggregate) => self.translate_aggregate(aggregate)?,
        })
    }

    fn translate_expressions(
        &mut self,
        exprs: &[ExprAst],
    ) -> Result<Vec<Expression>, TranslationError> {
        exprs
            .iter()
            .map(|expr| self.translate_expression(expr))
            .collect()
    }

    /// Replaces an aggregate with a fresh variable and registers it for the `GROUP` of the
    /// enclosing query.
    fn translate_aggregate(
        &mut self,
        aggregate: &AggregateAst,
    ) -> Result<Expression, TranslationError> {
        // Aggregates cannot be nested.
        let Some(mut aggregates) = self.aggregates.take() else {
            return Err(TranslationError::MisplacedAggregate {
                span: aggregate.span,
            });
        };
        let expression = match &aggregate.expr {
            None => Ok(AggregateExpression::CountSolutions {
                distinct: aggregate.distinct,
            }),
            Some(expr) => self
                .translate_expression(expr)
                .map(|expr| AggregateExpression::FunctionCall {
                    name: aggregate_function(&aggregate.function),
                    expr,
                    distinct: aggregate.distinct,
                }),
        };
        let result = expression.map(|expression| {
            let variable = self.fresh_variable("agg");
            aggregates.push((variable.clone(), expression));
            Expression::Variable(variable)
        });
        self.aggregates = Some(aggregates);
        result
    }
}

fn aggregate_function(function: &AggregateFunctionAst) -> AggregateFunction {
    match function {
        AggregateFunctionAst::Count => AggregateFunction::Count,
        AggregateFunctionAst::Sum => AggregateFunction::Sum,
        AggregateFunctionAst::Min => AggregateFunction::Min,
        AggregateFunctionAst::Max => AggregateFunction::Max,
        AggregateFunctionAst::Avg => AggregateFunction::Avg,
        AggregateFunctionAst::Sample => AggregateFunction::Sample,
        AggregateFunctionAst::GroupConcat { separator } => AggregateFunction::GroupConcat {
            separator: separator.clone(),
        },
    }
}
