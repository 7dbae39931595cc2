//! The SPARQL builtin functions and aggregates of RDF Loom.
//!
//! Every builtin is a small operator struct that implements one of the `Scalar*RdfOp` traits.
//! The traits describe the argument types of an operator. Extracting an argument from a
//! [TypedValueRef](rdf_loom_model::TypedValueRef) fails with a
//! [ThinError](rdf_loom_model::ThinError) if the value has the wrong type, which is how SPARQL
//! type errors are signalled. The [dispatch] module maps a [BuiltinName] and a list of argument
//! values onto the matching operator.
//!
//! Functional forms that must not evaluate all of their arguments (`IF`, `COALESCE`, `BOUND`,
//! `&&`, `||`, `EXISTS`) are not part of this crate. The expression evaluator of the engine
//! handles them.

pub mod aggregates;
mod comparison;
mod conversion;
mod dates_and_times;
pub mod dispatch;
mod hash;
mod name;
mod numeric;
mod strings;
mod terms;

pub use comparison::*;
pub use conversion::*;
pub use dates_and_times::*;
pub use hash::*;
pub use name::{BuiltinName, FunctionName, UnknownBuiltinError};
pub use numeric::*;
pub use strings::*;
pub use terms::*;

use rdf_loom_model::{RdfTermValueArg, TermRef, ThinError, ThinResult};

/// An operator without arguments (e.g., `RAND()`).
pub trait ScalarNullaryRdfOp {
    type Result;

    fn evaluate(&self) -> ThinResult<Self::Result>;
}

/// An operator that inspects the term itself instead of its value (e.g., `isIRI` or `STR`).
///
/// Term operators see the exact lexical form of literals.
pub trait ScalarUnaryTermOp {
    type Result;

    fn evaluate(&self, term: TermRef<'_>) -> ThinResult<Self::Result>;
}

/// A binary operator on terms (e.g., `sameTerm`).
pub trait ScalarBinaryTermOp {
    type Result;

    fn evaluate(&self, lhs: TermRef<'_>, rhs: TermRef<'_>) -> ThinResult<Self::Result>;
}

/// An operator with a single argument.
pub trait ScalarUnaryRdfOp {
    type Arg<'data>: RdfTermValueArg<'data>;
    type Result<'data>;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>>;

    /// Called if the argument could not be extracted.
    fn evaluate_error<'data>(&self) -> ThinResult<Self::Result<'data>> {
        ThinError::expected()
    }
}

/// An operator with two arguments.
pub trait ScalarBinaryRdfOp {
    type ArgLhs<'data>: RdfTermValueArg<'data>;
    type ArgRhs<'data>: RdfTermValueArg<'data>;
    type Result<'data>;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>>;

    fn evaluate_error<'data>(&self) -> ThinResult<Self::Result<'data>> {
        ThinError::expected()
    }
}

/// An operator with three arguments.
pub trait ScalarTernaryRdfOp {
    type Arg0<'data>: RdfTermValueArg<'data>;
    type Arg1<'data>: RdfTermValueArg<'data>;
    type Arg2<'data>: RdfTermValueArg<'data>;
    type Result<'data>;

    fn evaluate<'data>(
        &self,
        arg0: Self::Arg0<'data>,
        arg1: Self::Arg1<'data>,
        arg2: Self::Arg2<'data>,
    ) -> ThinResult<Self::Result<'data>>;

    fn evaluate_error<'data>(&self) -> ThinResult<Self::Result<'data>> {
        ThinError::expected()
    }
}

/// An operator with four arguments.
pub trait ScalarQuaternaryRdfOp {
    type Arg0<'data>: RdfTermValueArg<'data>;
    type Arg1<'data>: RdfTermValueArg<'data>;
    type Arg2<'data>: RdfTermValueArg<'data>;
    type Arg3<'data>: RdfTermValueArg<'data>;
    type Result<'data>;

    fn evaluate<'data>(
        &self,
        arg0: Self::Arg0<'data>,
        arg1: Self::Arg1<'data>,
        arg2: Self::Arg2<'data>,
        arg3: Self::Arg3<'data>,
    ) -> ThinResult<Self::Result<'data>>;

    fn evaluate_error<'data>(&self) -> ThinResult<Self::Result<'data>> {
        ThinError::expected()
    }
}

/// An operator with a variable number of arguments of the same type.
pub trait ScalarNAryRdfOp {
    type Args<'data>: RdfTermValueArg<'data>;
    type Result<'data>;

    fn evaluate<'data>(&self, args: &[Self::Args<'data>]) -> ThinResult<Self::Result<'data>>;

    fn evaluate_error<'data>(&self) -> ThinResult<Self::Result<'data>> {
        ThinError::expected()
    }
}
