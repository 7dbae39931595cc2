use crate::algebra::{
    AggregateExpression, Expression, NamedNodePattern, OrderExpression, PropertyPathExpression,
    TermPattern, TriplePattern,
};
use rdf_loom_model::{Term, Variable};
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A node of the SPARQL algebra.
///
/// The tree is immutable once translated. Children are reference-counted so that the lazy
/// iterators of the evaluator can hold on to the sub-tree they evaluate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphPattern {
    /// A basic graph pattern.
    Bgp { patterns: Vec<TriplePattern> },
    /// A property path that could not be desugared into other operators.
    Path {
        subject: TermPattern,
        path: PropertyPathExpression,
        object: TermPattern,
    },
    Join {
        left: Arc<Self>,
        right: Arc<Self>,
    },
    LeftJoin {
        left: Arc<Self>,
        right: Arc<Self>,
        expression: Option<Expression>,
    },
    Filter { expr: Expression, inner: Arc<Self> },
    Union {
        left: Arc<Self>,
        right: Arc<Self>,
    },
    Minus {
        left: Arc<Self>,
        right: Arc<Self>,
    },
    Graph {
        name: NamedNodePattern,
        inner: Arc<Self>,
    },
    Extend {
        inner: Arc<Self>,
        variable: Variable,
        expression: Expression,
    },
    /// Inline data. [None] stands for `UNDEF`.
    Values {
        variables: Vec<Variable>,
        bindings: Vec<Vec<Option<Term>>>,
    },
    OrderBy {
        inner: Arc<Self>,
        expression: Vec<OrderExpression>,
    },
    Project {
        inner: Arc<Self>,
        variables: Vec<Variable>,
    },
    Distinct { inner: Arc<Self> },
    Reduced { inner: Arc<Self> },
    Slice {
        inner: Arc<Self>,
        start: usize,
        length: Option<usize>,
    },
    Group {
        inner: Arc<Self>,
        variables: Vec<Variable>,
        aggregates: Vec<(Variable, AggregateExpression)>,
    },
    /// The boundary of a sub-select.
    ToMultiSet { inner: Arc<Self> },
    Service {
        name: NamedNodePattern,
        inner: Arc<Self>,
        silent: bool,
    },
}

/// The operator kinds of [GraphPattern]. Evaluation hooks are registered per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphPatternKind {
    Bgp,
    Path,
    Join,
    LeftJoin,
    Filter,
    Union,
    Minus,
    Graph,
    Extend,
    Values,
    OrderBy,
    Project,
    Distinct,
    Reduced,
    Slice,
    Group,
    ToMultiSet,
    Service,
}

impl Display for GraphPatternKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraphPatternKind::Bgp => "BGP",
            GraphPatternKind::Path => "Path",
            GraphPatternKind::Join => "Join",
            GraphPatternKind::LeftJoin => "LeftJoin",
            GraphPatternKind::Filter => "Filter",
            GraphPatternKind::Union => "Union",
            GraphPatternKind::Minus => "Minus",
            GraphPatternKind::Graph => "Graph",
            GraphPatternKind::Extend => "Extend",
            GraphPatternKind::Values => "Values",
            GraphPatternKind::OrderBy => "OrderBy",
            GraphPatternKind::Project => "Project",
            GraphPatternKind::Distinct => "Distinct",
            GraphPatternKind::Reduced => "Reduced",
            GraphPatternKind::Slice => "Slice",
            GraphPatternKind::Group => "Group",
            GraphPatternKind::ToMultiSet => "ToMultiSet",
            GraphPatternKind::Service => "Service",
        };
        f.write_str(name)
    }
}

/// Returns whether the variable was introduced by the translation (for blank nodes, path
/// sequences, aggregates, and unnamed group conditions).
///
/// Generated names contain a `.`, which is not allowed in SPARQL variable names. They are never
/// part of `SELECT *`.
pub fn is_generated_variable(variable: &Variable) -> bool {
    variable.as_str().contains('.')
}

impl GraphPattern {
    /// The pattern with a single empty solution. It is the identity of [GraphPattern::Join].
    pub fn empty_singleton() -> Self {
        GraphPattern::Values {
            variables: Vec::new(),
            bindings: vec![Vec::new()],
        }
    }

    pub fn is_empty_singleton(&self) -> bool {
        matches!(
            self,
            GraphPattern::Values { variables, bindings }
                if variables.is_empty() && bindings.len() == 1
        )
    }

    pub fn kind(&self) -> GraphPatternKind {
        match self {
            GraphPattern::Bgp { .. } => GraphPatternKind::Bgp,
            GraphPattern::Path { .. } => GraphPatternKind::Path,
            GraphPattern::Join { .. } => GraphPatternKind::Join,
            GraphPattern::LeftJoin { .. } => GraphPatternKind::LeftJoin,
            GraphPattern::Filter { .. } => GraphPatternKind::Filter,
            GraphPattern::Union { .. } => GraphPatternKind::Union,
            GraphPattern::Minus { .. } => GraphPatternKind::Minus,
            GraphPattern::Graph { .. } => GraphPatternKind::Graph,
            GraphPattern::Extend { .. } => GraphPatternKind::Extend,
            GraphPattern::Values { .. } => GraphPatternKind::Values,
            GraphPattern::OrderBy { .. } => GraphPatternKind::OrderBy,
            GraphPattern::Project { .. } => GraphPatternKind::Project,
            GraphPattern::Distinct { .. } => GraphPatternKind::Distinct,
            GraphPattern::Reduced { .. } => GraphPatternKind::Reduced,
            GraphPattern::Slice { .. } => GraphPatternKind::Slice,
            GraphPattern::Group { .. } => GraphPatternKind::Group,
            GraphPattern::ToMultiSet { .. } => GraphPatternKind::ToMultiSet,
            GraphPattern::Service { .. } => GraphPatternKind::Service,
        }
    }

    /// Calls `callback` for each variable that can be bound by the solutions of this pattern.
    ///
    /// Variables may be reported more than once.
    pub fn on_in_scope_variable<'a>(&'a self, callback: &mut impl FnMut(&'a Variable)) {
        match self {
            GraphPattern::Bgp { patterns } => {
                for pattern in patterns {
                    on_term_pattern_variable(&pattern.subject, callback);
                    if let NamedNodePattern::Variable(variable) = &pattern.predicate {
                        callback(variable);
                    }
                    on_term_pattern_variable(&pattern.object, callback);
                }
            }
            GraphPattern::Path {
                subject, object, ..
            } => {
                on_term_pattern_variable(subject, callback);
                on_term_pattern_variable(object, callback);
            }
            GraphPattern::Join { left, right }
            | GraphPattern::LeftJoin { left, right, .. }
            | GraphPattern::Union { left, right } => {
                left.on_in_scope_variable(callback);
                right.on_in_scope_variable(callback);
            }
            GraphPattern::Minus { left, .. } => left.on_in_scope_variable(callback),
            GraphPattern::Graph { name, inner } | GraphPattern::Service { name, inner, .. } => {
                if let NamedNodePattern::Variable(variable) = name {
                    callback(variable);
                }
                inner.on_in_scope_variable(callback);
            }
            GraphPattern::Extend {
                inner, variable, ..
            } => {
                inner.on_in_scope_variable(callback);
                callback(variable);
            }
            GraphPattern::Values { variables, .. } | GraphPattern::Project { variables, .. } => {
                for variable in variables {
                    callback(variable);
                }
            }
            GraphPattern::Group {
                variables,
                aggregates,
                ..
            } => {
                for variable in variables {
                    callback(variable);
                }
                for (variable, _) in aggregates {
                    callback(variable);
                }
            }
            GraphPattern::Filter { inner, .. }
            | GraphPattern::OrderBy { inner, .. }
            | GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. }
            | GraphPattern::ToMultiSet { inner } => inner.on_in_scope_variable(callback),
        }
    }

    /// The in-scope variables without duplicates, in order of their first appearance.
    pub fn in_scope_variables(&self) -> Vec<Variable> {
        let mut seen = FxHashSet::default();
        let mut variables = Vec::new();
        self.on_in_scope_variable(&mut |variable| {
            if seen.insert(variable) {
                variables.push(variable.clone());
            }
        });
        variables
    }

    /// Every variable mentioned by the pattern or its expressions that is visible from the
    /// outside. Variables hidden by a sub-select projection are not included.
    pub fn mentioned_variables(&self) -> FxHashSet<Variable> {
        let mut variables = FxHashSet::default();
        self.on_mentioned_variable(&mut |variable| {
            variables.insert(variable.clone());
        });
        variables
    }

    fn on_mentioned_variable<'a>(&'a self, callback: &mut dyn FnMut(&'a Variable)) {
        match self {
            GraphPattern::Bgp { .. }
            | GraphPattern::Path { .. }
            | GraphPattern::Values { .. }
            | GraphPattern::Project { .. } => {
                self.on_in_scope_variable(&mut |variable| callback(variable));
            }
            GraphPattern::Join { left, right }
            | GraphPattern::Union { left, right }
            | GraphPattern::Minus { left, right } => {
                left.on_mentioned_variable(callback);
                right.on_mentioned_variable(callback);
            }
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => {
                left.on_mentioned_variable(callback);
                right.on_mentioned_variable(callback);
                if let Some(expression) = expression {
                    on_expression_mentioned_variable(expression, callback);
                }
            }
            GraphPattern::Filter { expr, inner } => {
                on_expression_mentioned_variable(expr, callback);
                inner.on_mentioned_variable(callback);
            }
            GraphPattern::Graph { name, inner } | GraphPattern::Service { name, inner, .. } => {
                if let NamedNodePattern::Variable(variable) = name {
                    callback(variable);
                }
                inner.on_mentioned_variable(callback);
            }
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => {
                inner.on_mentioned_variable(callback);
                callback(variable);
                on_expression_mentioned_variable(expression, callback);
            }
            GraphPattern::OrderBy { inner, expression } => {
                inner.on_mentioned_variable(callback);
                for condition in expression {
                    on_expression_mentioned_variable(condition.expression(), callback);
                }
            }
            GraphPattern::Group {
                inner,
                variables,
                aggregates,
            } => {
                inner.on_mentioned_variable(callback);
                for variable in variables {
                    callback(variable);
                }
                for (variable, aggregate) in aggregates {
                    callback(variable);
                    if let AggregateExpression::FunctionCall { expr, .. } = aggregate {
                        on_expression_mentioned_variable(expr, callback);
                    }
                }
            }
            GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. }
            | GraphPattern::ToMultiSet { inner } => inner.on_mentioned_variable(callback),
        }
    }
}

fn on_term_pattern_variable<'a>(pattern: &'a TermPattern, callback: &mut impl FnMut(&'a Variable)) {
    if let TermPattern::Variable(variable) = pattern {
        callback(variable);
    }
}

/// Like [Expression::on_variable], but also descends into `EXISTS`.
fn on_expression_mentioned_variable<'a>(
    expression: &'a Expression,
    callback: &mut dyn FnMut(&'a Variable),
) {
    match expression {
        Expression::Exists(pattern) => pattern.on_mentioned_variable(callback),
        Expression::Variable(variable) | Expression::Bound(variable) => callback(variable),
        Expression::NamedNode(_) | Expression::Literal(_) => {}
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
            on_expression_mentioned_variable(lhs, callback);
            on_expression_mentioned_variable(rhs, callback);
        }
        Expression::In(needle, haystack) => {
            on_expression_mentioned_variable(needle, callback);
            for expression in haystack {
                on_expression_mentioned_variable(expression, callback);
            }
        }
        Expression::UnaryPlus(inner) | Expression::UnaryMinus(inner) | Expression::Not(inner) => {
            on_expression_mentioned_variable(inner, callback);
        }
        Expression::If(condition, then, otherwise) => {
            on_expression_mentioned_variable(condition, callback);
            on_expression_mentioned_variable(then, callback);
            on_expression_mentioned_variable(otherwise, callback);
        }
        Expression::Coalesce(args) | Expression::FunctionCall(_, args) => {
            for arg in args {
                on_expression_mentioned_variable(arg, callback);
            }
        }
    }
}
impl Display for GraphPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphPattern::Bgp { patterns } => {
                f.write_str("(bgp")?;
                for pattern in patterns {
                    write!(f, " {pattern}")?;
                }
                f.write_str(")")
            }
            GraphPattern::Path {
                subject,
                path,
                object,
            } => write!(f, "(path {subject} {path} {object})"),
            GraphPattern::Join { left, right } => write!(f, "(join {left} {right})"),
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => {
                write!(f, "(leftjoin {left} {right}")?;
                if let Some(expression) = expression {
                    write!(f, " {expression}")?;
                }
                f.write_str(")")
            }
            GraphPattern::Filter { expr, inner } => write!(f, "(filter {expr} {inner})"),
            GraphPattern::Union { left, right } => write!(f, "(union {left} {right})"),
            GraphPattern::Minus { left, right } => write!(f, "(minus {left} {right})"),
            GraphPattern::Graph { name, inner } => write!(f, "(graph {name} {inner})"),
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => write!(f, "(extend (({variable} {expression})) {inner})"),
            GraphPattern::Values {
                variables,
                bindings,
            } => {
                f.write_str("(table (vars")?;
                for variable in variables {
                    write!(f, " {variable}")?;
                }
                f.write_str(")")?;
                for row in bindings {
                    f.write_str(" (row")?;
                    for (variable, value) in variables.iter().zip(row) {
                        if let Some(value) = value {
                            write!(f, " [{variable} {value}]")?;
                        }
                    }
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            GraphPattern::OrderBy { inner, expression } => {
                f.write_str("(order (")?;
                for (i, condition) in expression.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{condition}")?;
                }
                write!(f, ") {inner})")
            }
            GraphPattern::Project { inner, variables } => {
                f.write_str("(project (")?;
                write_variables(f, variables)?;
                write!(f, ") {inner})")
            }
            GraphPattern::Distinct { inner } => write!(f, "(distinct {inner})"),
            GraphPattern::Reduced { inner } => write!(f, "(reduced {inner})"),
            GraphPattern::Slice {
                inner,
                start,
                length,
            } => match length {
                Some(length) => write!(f, "(slice {start} {length} {inner})"),
                None => write!(f, "(slice {start} _ {inner})"),
            },
            GraphPattern::Group {
                inner,
                variables,
                aggregates,
            } => {
                f.write_str("(group (")?;
                write_variables(f, variables)?;
                f.write_str(") (")?;
                for (i, (variable, aggregate)) in aggregates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "({variable} {aggregate})")?;
                }
                write!(f, ") {inner})")
            }
            GraphPattern::ToMultiSet { inner } => write!(f, "(tomultiset {inner})"),
            GraphPattern::Service {
                name,
                inner,
                silent,
            } => {
                if *silent {
                    write!(f, "(service silent {name} {inner})")
                } else {
                    write!(f, "(service {name} {inner})")
                }
            }
        }
    }
}

fn write_variables(f: &mut Formatter<'_>, variables: &[Variable]) -> std::fmt::Result {
    for (i, variable) in variables.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{variable}")?;
    }
    Ok(())
}
