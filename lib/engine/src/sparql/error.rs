use rdf_loom_common::error::StorageError;
use rdf_loom_logical::algebra::NamedNodePattern;
use rdf_loom_logical::TranslationError;
use rdf_loom_model::IriParseError;
use rdf_loom_parser::SyntaxError;
use std::error::Error;
use std::sync::Arc;

/// An error while preparing a query or an update.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryPreparationError {
    /// The text is not valid SPARQL.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The text is valid SPARQL but cannot be translated into the algebra.
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// A SPARQL evaluation error.
///
/// Type errors inside of expressions are not reported with this type. They are handled by the
/// operator that evaluates the expression (e.g., a `FILTER` drops the solution). This type is
/// reserved for errors that abort the evaluation.
///
/// The error is cheap to clone. A failed [QuerySolutionStream](crate::QuerySolutionStream)
/// returns the same error to every later access.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// An error raised by an evaluation hook.
    ///
    /// The source is the original error of the hook and can be recovered with
    /// `downcast_ref` on the inner error.
    #[error(transparent)]
    Extension(Arc<dyn Error + Send + Sync + 'static>),
    /// An error from the storage.
    #[error(transparent)]
    Storage(Arc<StorageError>),
    /// The base IRI passed to the evaluation is invalid.
    #[error("Invalid base IRI: {0}")]
    InvalidBaseIri(Arc<IriParseError>),
    /// The given `SERVICE` is not supported.
    #[error("The service {0} is not supported")]
    UnsupportedService(NamedNodePattern),
}

impl QueryEvaluationError {
    /// Wraps an error raised by an evaluation hook.
    pub fn extension(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Extension(Arc::from(error.into()))
    }
}

impl From<StorageError> for QueryEvaluationError {
    fn from(error: StorageError) -> Self {
        Self::Storage(Arc::new(error))
    }
}

impl From<IriParseError> for QueryEvaluationError {
    fn from(error: IriParseError) -> Self {
        Self::InvalidBaseIri(Arc::new(error))
    }
}
