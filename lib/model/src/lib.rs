//! The data model of RDF Loom.
//!
//! Terms, quads and variables are taken from oxrdf. On top of that, this crate provides the
//! value-space view of terms ([TypedValue]) that expression evaluation works with, the
//! [ThinError] used for expected SPARQL errors, and the orderings used by comparisons and
//! `ORDER BY`.

mod error;
mod literal;
mod numeric;
pub mod order;
mod typed_value;
mod value_arg;
pub mod vocab;
mod xsd;

pub use error::*;
pub use literal::*;
pub use numeric::*;
pub use typed_value::*;
pub use value_arg::*;
pub use xsd::*;

// Re-export some oxrdf types.
pub use oxiri::{Iri, IriParseError};
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, Graph, GraphName, GraphNameRef, Literal,
    LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef,
    Subject, SubjectRef, Term, TermRef, Triple, TripleRef, Variable, VariableNameParseError,
    VariableRef,
};
