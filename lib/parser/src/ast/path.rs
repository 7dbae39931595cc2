use crate::ast::IriAst;

/// A property path expression.
///
/// A plain predicate is a path consisting only of [PathAst::Iri].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathAst {
    Iri(IriAst),
    /// The keyword `a`.
    A,
    /// `^path`
    Inverse(Box<PathAst>),
    /// `path / path / ...`
    Sequence(Vec<PathAst>),
    /// `path | path | ...`
    Alternative(Vec<PathAst>),
    /// `path*`
    ZeroOrMore(Box<PathAst>),
    /// `path+`
    OneOrMore(Box<PathAst>),
    /// `path?`
    ZeroOrOne(Box<PathAst>),
    /// `!iri` or `!(iri | ^iri | ...)`
    NegatedPropertySet(Vec<NegatedPathItem>),
}

/// An element of a negated property set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NegatedPathItem {
    pub inverse: bool,
    /// [None] stands for `a`.
    pub iri: Option<IriAst>,
}
