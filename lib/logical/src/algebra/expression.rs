use crate::algebra::GraphPattern;
use rdf_loom_functions::aggregates::AggregateFunction;
use rdf_loom_functions::FunctionName;
use rdf_loom_model::{Literal, NamedNode, Variable};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A SPARQL expression.
///
/// `!=` and `NOT IN` are represented with [Expression::Not]. Built-in functions, XSD casts and
/// custom functions are all [Expression::FunctionCall]s. The functional forms that control
/// the evaluation of their arguments have their own variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    NamedNode(NamedNode),
    Literal(Literal),
    Variable(Variable),
    Or(Box<Self>, Box<Self>),
    And(Box<Self>, Box<Self>),
    Equal(Box<Self>, Box<Self>),
    Greater(Box<Self>, Box<Self>),
    GreaterOrEqual(Box<Self>, Box<Self>),
    Less(Box<Self>, Box<Self>),
    LessOrEqual(Box<Self>, Box<Self>),
    In(Box<Self>, Vec<Self>),
    Add(Box<Self>, Box<Self>),
    Subtract(Box<Self>, Box<Self>),
    Multiply(Box<Self>, Box<Self>),
    Divide(Box<Self>, Box<Self>),
    UnaryPlus(Box<Self>),
    UnaryMinus(Box<Self>),
    Not(Box<Self>),
    Exists(Arc<GraphPattern>),
    Bound(Variable),
    If(Box<Self>, Box<Self>, Box<Self>),
    Coalesce(Vec<Self>),
    FunctionCall(FunctionName, Vec<Self>),
}

impl Expression {
    /// Calls `callback` for every variable the expression reads outside of `EXISTS`.
    pub fn on_variable<'a>(&'a self, callback: &mut impl FnMut(&'a Variable)) {
        match self {
            Expression::NamedNode(_) | Expression::Literal(_) | Expression::Exists(_) => {}
            Expression::Variable(variable) | Expression::Bound(variable) => callback(variable),
            Expression::Or(lhs, rhs)
            | Expression::And(lhs, rhs)
            | Expression::Equal(lhs, rhs)
            | Expression::Greater(lhs, rhs)
            | Expression::GreaterOrEqual(lhs, rhs)
            | Expression::Less(lhs, rhs)
            | Expression::LessOrEqual(lhs, rhs)
            | Expression::Add(lhs, rhs)
            | Expression::Subtract(lhs, rhs)
            | Expression::Multiply(lhs, rhs)
            | Expression::Divide(lhs, rhs) => {
                lhs.on_variable(callback);
                rhs.on_variable(callback);
            }
            Expression::In(needle, haystack) => {
                needle.on_variable(callback);
                for expression in haystack {
                    expression.on_variable(callback);
                }
            }
            Expression::UnaryPlus(inner)
            | Expression::UnaryMinus(inner)
            | Expression::Not(inner) => inner.on_variable(callback),
            Expression::If(condition, then, otherwise) => {
                condition.on_variable(callback);
                then.on_variable(callback);
                otherwise.on_variable(callback);
            }
            Expression::Coalesce(args) | Expression::FunctionCall(_, args) => {
                for arg in args {
                    arg.on_variable(callback);
                }
            }
        }
    }

    /// Conjunction of `self` and `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Expression::And(Box::new(self), Box::new(other))
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Variable(variable)
    }
}

impl From<NamedNode> for Expression {
    fn from(node: NamedNode) -> Self {
        Expression::NamedNode(node)
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::NamedNode(node) => node.fmt(f),
            Expression::Literal(literal) => literal.fmt(f),
            Expression::Variable(variable) => variable.fmt(f),
            Expression::Or(lhs, rhs) => write!(f, "(|| {lhs} {rhs})"),
            Expression::And(lhs, rhs) => write!(f, "(&& {lhs} {rhs})"),
            Expression::Equal(lhs, rhs) => write!(f, "(= {lhs} {rhs})"),
            Expression::Greater(lhs, rhs) => write!(f, "(> {lhs} {rhs})"),
            Expression::GreaterOrEqual(lhs, rhs) => write!(f, "(>= {lhs} {rhs})"),
            Expression::Less(lhs, rhs) => write!(f, "(< {lhs} {rhs})"),
            Expression::LessOrEqual(lhs, rhs) => write!(f, "(<= {lhs} {rhs})"),
            Expression::In(needle, haystack) => {
                write!(f, "(in {needle}")?;
                for expression in haystack {
                    write!(f, " {expression}")?;
                }
                f.write_str(")")
            }
            Expression::Add(lhs, rhs) => write!(f, "(+ {lhs} {rhs})"),
            Expression::Subtract(lhs, rhs) => write!(f, "(- {lhs} {rhs})"),
            Expression::Multiply(lhs, rhs) => write!(f, "(* {lhs} {rhs})"),
            Expression::Divide(lhs, rhs) => write!(f, "(/ {lhs} {rhs})"),
            Expression::UnaryPlus(inner) => write!(f, "(+ {inner})"),
            Expression::UnaryMinus(inner) => write!(f, "(- {inner})"),
            Expression::Not(inner) => write!(f, "(! {inner})"),
            Expression::Exists(pattern) => write!(f, "(exists {pattern})"),
            Expression::Bound(variable) => write!(f, "(bound {variable})"),
            Expression::If(condition, then, otherwise) => {
                write!(f, "(if {condition} {then} {otherwise})")
            }
            Expression::Coalesce(args) => {
                f.write_str("(coalesce")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            Expression::FunctionCall(name, args) => {
                write!(f, "({name}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// An aggregate in a `GROUP`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AggregateExpression {
    /// `COUNT(*)`
    CountSolutions { distinct: bool },
    FunctionCall {
        name: AggregateFunction,
        expr: Expression,
        distinct: bool,
    },
}

impl Display for AggregateExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateExpression::CountSolutions { distinct } => {
                if *distinct {
                    f.write_str("(count distinct)")
                } else {
                    f.write_str("(count)")
                }
            }
            AggregateExpression::FunctionCall {
                name,
                expr,
                distinct,
            } => {
                write!(f, "({name}")?;
                if *distinct {
                    f.write_str(" distinct")?;
                }
                write!(f, " {expr}")?;
                if let AggregateFunction::GroupConcat {
                    separator: Some(separator),
                } = name
                {
                    write!(f, " {}", Literal::new_simple_literal(separator))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A condition of `ORDER BY`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderExpression {
    Asc(Expression),
    Desc(Expression),
}

impl OrderExpression {
    pub fn expression(&self) -> &Expression {
        match self {
            OrderExpression::Asc(expression) | OrderExpression::Desc(expression) => expression,
        }
    }
}

impl Display for OrderExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderExpression::Asc(expression) => write!(f, "(asc {expression})"),
            OrderExpression::Desc(expression) => write!(f, "(desc {expression})"),
        }
    }
}
