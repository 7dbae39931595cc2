use crate::ast::{ExprAst, GroupGraphPattern, InlineData, IriAst, TriplesSameSubject, VarAst, VarOrIri};
use crate::span::SourceSpan;

/// A `BASE` or `PREFIX` declaration. Declarations are kept in source order as a later `BASE`
/// affects how later relative IRIs are resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrologueDecl {
    Base { iri: String, span: SourceSpan },
    Prefix {
        prefix: String,
        iri: String,
        span: SourceSpan,
    },
}

/// A parsed SPARQL query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryAst {
    pub prologue: Vec<PrologueDecl>,
    pub form: QueryFormAst,
    pub dataset: Vec<DatasetClause>,
    /// [None] for `DESCRIBE` without a `WHERE` clause.
    pub where_clause: Option<GroupGraphPattern>,
    pub modifiers: SolutionModifiers,
    /// The trailing `VALUES` block.
    pub values: Option<InlineData>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryFormAst {
    Select(SelectClause),
    /// [None] for the `CONSTRUCT WHERE { ... }` short form.
    Construct(Option<Vec<TriplesSameSubject>>),
    /// [None] for `DESCRIBE *`.
    Describe(Option<Vec<VarOrIri>>),
    Ask,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectModifier {
    Distinct,
    Reduced,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectClause {
    pub modifier: Option<SelectModifier>,
    /// [None] for `SELECT *`.
    pub projection: Option<Vec<SelectItem>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectItem {
    Var(VarAst),
    /// `(expr AS ?var)`
    Expr(ExprAst, VarAst),
}

/// A sub-select. It does not have a prologue or dataset clauses of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct SubSelect {
    pub select: SelectClause,
    pub where_clause: GroupGraphPattern,
    pub modifiers: SolutionModifiers,
    pub values: Option<InlineData>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetClause {
    Default(IriAst),
    Named(IriAst),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolutionModifiers {
    pub group_by: Vec<GroupCondition>,
    pub having: Vec<ExprAst>,
    pub order_by: Vec<OrderCondition>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// A `GROUP BY` condition, optionally bound to a variable with `AS`.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupCondition {
    pub expr: ExprAst,
    pub var: Option<VarAst>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderCondition {
    pub expr: ExprAst,
    pub descending: bool,
}
