use crate::ast::{ExprAst, PathAst, SubSelect, TermAst, VarAst, VarOrIri};
use crate::span::SourceSpan;

/// `{ ... }`: either a sub-select or a list of group elements in source order.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupGraphPattern {
    SubSelect(Box<SubSelect>),
    Group(Vec<GroupElement>),
}

/// An element of a group graph pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupElement {
    /// A block of triples between other elements.
    Triples(Vec<TriplesSameSubject>),
    Optional(GroupGraphPattern),
    /// `{ ... } UNION { ... } ...`. A single entry is a plain nested group.
    Union(Vec<GroupGraphPattern>),
    Minus(GroupGraphPattern),
    Graph(VarOrIri, GroupGraphPattern),
    Service {
        silent: bool,
        name: VarOrIri,
        pattern: GroupGraphPattern,
    },
    Filter(ExprAst),
    Bind {
        expr: ExprAst,
        var: VarAst,
        span: SourceSpan,
    },
    Values(InlineData),
}

/// A node in a triple pattern. Collections and blank node property lists produce additional
/// triples when translated.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphNode {
    Term(TermAst),
    /// `( node ... )`
    Collection(Vec<GraphNode>),
    /// `[ verb objects ; ... ]`
    BlankNodePropertyList(Vec<PropertyListItem>),
}

/// The verb of a triple. Either a variable or a property path.
#[derive(Clone, Debug, PartialEq)]
pub enum VerbAst {
    Var(VarAst),
    Path(PathAst),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyListItem {
    pub verb: VerbAst,
    pub objects: Vec<GraphNode>,
}

/// `subject verb object , object ; verb object`
#[derive(Clone, Debug, PartialEq)]
pub struct TriplesSameSubject {
    pub subject: GraphNode,
    pub properties: Vec<PropertyListItem>,
    pub span: SourceSpan,
}

/// `VALUES`. A single-variable block is normalized into the multi-variable form.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineData {
    pub variables: Vec<VarAst>,
    /// [None] stands for `UNDEF`.
    pub rows: Vec<Vec<Option<TermAst>>>,
    pub span: SourceSpan,
}
