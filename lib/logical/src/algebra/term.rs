use rdf_loom_model::{BlankNode, Literal, NamedNode, Term, TermRef, Variable};
use std::fmt::{Display, Formatter};

/// A term or a variable in a triple pattern.
///
/// Blank nodes only survive translation in `CONSTRUCT` templates. In graph patterns they are
/// replaced by variables that are never projected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermPattern {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
}

impl TermPattern {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            TermPattern::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    /// Returns the term if the pattern is a constant.
    pub fn as_term(&self) -> Option<TermRef<'_>> {
        match self {
            TermPattern::NamedNode(node) => Some(node.as_ref().into()),
            TermPattern::BlankNode(node) => Some(node.as_ref().into()),
            TermPattern::Literal(literal) => Some(literal.as_ref().into()),
            TermPattern::Variable(_) => None,
        }
    }
}

impl From<Variable> for TermPattern {
    fn from(variable: Variable) -> Self {
        TermPattern::Variable(variable)
    }
}

impl From<NamedNode> for TermPattern {
    fn from(node: NamedNode) -> Self {
        TermPattern::NamedNode(node)
    }
}

impl From<Literal> for TermPattern {
    fn from(literal: Literal) -> Self {
        TermPattern::Literal(literal)
    }
}

impl From<Term> for TermPattern {
    fn from(term: Term) -> Self {
        match term {
            Term::NamedNode(node) => TermPattern::NamedNode(node),
            Term::BlankNode(node) => TermPattern::BlankNode(node),
            Term::Literal(literal) => TermPattern::Literal(literal),
        }
    }
}

impl From<NamedNodePattern> for TermPattern {
    fn from(pattern: NamedNodePattern) -> Self {
        match pattern {
            NamedNodePattern::NamedNode(node) => TermPattern::NamedNode(node),
            NamedNodePattern::Variable(variable) => TermPattern::Variable(variable),
        }
    }
}

impl Display for TermPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TermPattern::NamedNode(node) => node.fmt(f),
            TermPattern::BlankNode(node) => node.fmt(f),
            TermPattern::Literal(literal) => literal.fmt(f),
            TermPattern::Variable(variable) => variable.fmt(f),
        }
    }
}

/// An IRI or a variable. Used for predicates and graph names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamedNodePattern {
    NamedNode(NamedNode),
    Variable(Variable),
}

impl From<NamedNode> for NamedNodePattern {
    fn from(node: NamedNode) -> Self {
        NamedNodePattern::NamedNode(node)
    }
}

impl From<Variable> for NamedNodePattern {
    fn from(variable: Variable) -> Self {
        NamedNodePattern::Variable(variable)
    }
}

impl Display for NamedNodePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NamedNodePattern::NamedNode(node) => node.fmt(f),
            NamedNodePattern::Variable(variable) => variable.fmt(f),
        }
    }
}

/// A triple pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: NamedNodePattern,
    pub object: TermPattern,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(triple {} {} {})", self.subject, self.predicate, self.object)
    }
}

/// The graph of a quad pattern in an update template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNamePattern {
    NamedNode(NamedNode),
    DefaultGraph,
    Variable(Variable),
}

impl Display for GraphNamePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphNamePattern::NamedNode(node) => node.fmt(f),
            GraphNamePattern::DefaultGraph => f.write_str("default"),
            GraphNamePattern::Variable(variable) => variable.fmt(f),
        }
    }
}

/// A quad pattern in an update template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    pub subject: TermPattern,
    pub predicate: NamedNodePattern,
    pub object: TermPattern,
    pub graph_name: GraphNamePattern,
}

impl Display for QuadPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.graph_name == GraphNamePattern::DefaultGraph {
            write!(f, "(triple {} {} {})", self.subject, self.predicate, self.object)
        } else {
            write!(
                f,
                "(graph {} (triple {} {} {}))",
                self.graph_name, self.subject, self.predicate, self.object
            )
        }
    }
}
