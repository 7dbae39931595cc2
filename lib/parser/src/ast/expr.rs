use crate::ast::{GroupGraphPattern, IriAst, LiteralAst, VarAst};
use crate::span::SourceSpan;

/// An expression in `FILTER`, `BIND`, `SELECT`, `HAVING`, `ORDER BY`, or `GROUP BY`.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprAst {
    Or(Box<ExprAst>, Box<ExprAst>),
    And(Box<ExprAst>, Box<ExprAst>),
    Compare(CompareOp, Box<ExprAst>, Box<ExprAst>),
    In {
        needle: Box<ExprAst>,
        haystack: Vec<ExprAst>,
        negated: bool,
    },
    Arithmetic(ArithmeticOp, Box<ExprAst>, Box<ExprAst>),
    UnaryPlus(Box<ExprAst>),
    UnaryMinus(Box<ExprAst>),
    Not(Box<ExprAst>),
    Var(VarAst),
    Iri(IriAst),
    Literal(LiteralAst),
    /// A built-in call such as `STRLEN(?x)`. The name is upper case.
    Builtin {
        name: String,
        args: Vec<ExprAst>,
        span: SourceSpan,
    },
    /// A call of a function identified by an IRI, including XSD casts.
    FunctionCall {
        name: IriAst,
        distinct: bool,
        args: Vec<ExprAst>,
    },
    Exists(Box<GroupGraphPattern>),
    NotExists(Box<GroupGraphPattern>),
    Aggregate(AggregateAst),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// An aggregate call.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateAst {
    pub function: AggregateFunctionAst,
    pub distinct: bool,
    /// [None] for `COUNT(*)`.
    pub expr: Option<Box<ExprAst>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunctionAst {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Sample,
    GroupConcat { separator: Option<String> },
}
