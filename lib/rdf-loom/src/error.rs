use oxrdfio::RdfParseError;
use rdf_loom_common::error::StorageError;
use rdf_loom_engine::sparql::error::{QueryEvaluationError, QueryPreparationError};
use std::io;

/// An error raised while loading a file into a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An error raised while reading the file.
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
    /// An error raised during the insertion in the store.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<LoaderError> for io::Error {
    #[inline]
    fn from(error: LoaderError) -> Self {
        match error {
            LoaderError::Storage(error) => error.into(),
            LoaderError::Parsing(error) => error.into(),
        }
    }
}

/// An error raised while querying a [`Store`](crate::store::Store) with a query string.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query could not be parsed or translated.
    #[error(transparent)]
    Preparation(#[from] QueryPreparationError),
    /// The evaluation of the query failed.
    #[error(transparent)]
    Evaluation(#[from] QueryEvaluationError),
}
