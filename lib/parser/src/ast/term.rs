//! Terms as they appear in the source. Nothing is resolved yet.

use crate::span::SourceSpan;

/// An IRI reference, either written in full or as a prefixed name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IriAst {
    /// `<...>`, possibly relative.
    IriRef { iri: String, span: SourceSpan },
    /// `prefix:local`
    Prefixed {
        prefix: String,
        local: String,
        span: SourceSpan,
    },
}

impl IriAst {
    pub fn span(&self) -> SourceSpan {
        match self {
            IriAst::IriRef { span, .. } | IriAst::Prefixed { span, .. } => *span,
        }
    }
}

/// A variable, stored without the sigil.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarAst {
    pub name: String,
    pub span: SourceSpan,
}

/// The kind of a numeric literal written without quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Integer,
    Decimal,
    Double,
}

/// A literal as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralAst {
    /// A quoted string, optionally with a language tag or datatype.
    String {
        value: String,
        annotation: LiteralAnnotation,
    },
    /// An unquoted number. The lexical form includes the sign, if any.
    Numeric { kind: NumericKind, lexical: String },
    Boolean(bool),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralAnnotation {
    None,
    Language(String),
    Datatype(IriAst),
}

/// A term in a triple pattern or a data block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermAst {
    Iri(IriAst),
    Literal(LiteralAst),
    /// `_:label`
    BlankNode(String),
    /// `[]`
    Anon,
    /// `()`
    Nil,
    Var(VarAst),
}

/// A variable or an IRI, as used by `GRAPH`, `SERVICE`, `DESCRIBE`, and friends.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarOrIri {
    Var(VarAst),
    Iri(IriAst),
}

impl VarOrIri {
    pub fn is_var(&self) -> bool {
        matches!(self, VarOrIri::Var(_))
    }
}
