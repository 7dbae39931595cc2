use rdf_loom_model::NamedNode;
use std::fmt::{Display, Formatter};

/// A property path expression.
///
/// Top-level sequences, alternatives and inverse paths are desugared during translation. Paths
/// that remain in the algebra may still contain them as sub-expressions, e.g. `(a|b)*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPathExpression {
    NamedNode(NamedNode),
    Reverse(Box<Self>),
    Sequence(Box<Self>, Box<Self>),
    Alternative(Box<Self>, Box<Self>),
    ZeroOrMore(Box<Self>),
    OneOrMore(Box<Self>),
    ZeroOrOne(Box<Self>),
    /// `!(p1 | ... | pn)`. Inverted members are represented as a reversed set.
    NegatedPropertySet(Vec<NamedNode>),
}

impl Display for PropertyPathExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyPathExpression::NamedNode(node) => node.fmt(f),
            PropertyPathExpression::Reverse(inner) => write!(f, "(reverse {inner})"),
            PropertyPathExpression::Sequence(lhs, rhs) => write!(f, "(seq {lhs} {rhs})"),
            PropertyPathExpression::Alternative(lhs, rhs) => write!(f, "(alt {lhs} {rhs})"),
            PropertyPathExpression::ZeroOrMore(inner) => write!(f, "(path* {inner})"),
            PropertyPathExpression::OneOrMore(inner) => write!(f, "(path+ {inner})"),
            PropertyPathExpression::ZeroOrOne(inner) => write!(f, "(path? {inner})"),
            PropertyPathExpression::NegatedPropertySet(nodes) => {
                f.write_str("(notoneof")?;
                for node in nodes {
                    write!(f, " {node}")?;
                }
                f.write_str(")")
            }
        }
    }
}
