use crate::error::StorageError;
use rdf_loom_model::{
    GraphNameRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef,
    SubjectRef, TermRef,
};

/// An iterator over the quads matching a pattern.
pub type QuadIter<'storage> = Box<dyn Iterator<Item = Result<Quad, StorageError>> + 'storage>;

/// The quad pattern evaluator gives read access to the quads of a storage.
///
/// This is everything the query engine needs from the storage layer. Write access is not part of
/// this trait.
///
/// # Consistency
///
/// The storage is assumed to be unchanged for the duration of a query evaluation. A query that
/// runs concurrently to writes may observe some of them.
#[allow(clippy::len_without_is_empty)]
pub trait QuadPatternEvaluator: Send + Sync {
    /// Returns the quads that match the given pattern. [None] acts as a wildcard.
    ///
    /// `graph_name` set to [None] matches all graphs, including the default graph.
    fn quads_for_pattern(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph_name: Option<GraphNameRef<'_>>,
    ) -> QuadIter<'_>;

    /// Returns the list of named graphs in the storage.
    fn named_graphs(&self) -> Result<Vec<NamedOrBlankNode>, StorageError>;

    /// Returns whether `graph_name` is a named graph in the storage.
    fn contains_named_graph(
        &self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Result<bool, StorageError>;

    /// Returns the number of quads in the storage.
    fn len(&self) -> Result<usize, StorageError>;
}

/// A storage of quads that can be modified.
pub trait QuadStorage: QuadPatternEvaluator {
    /// Loads the given quads into the storage. Returns the number of quads that were not already
    /// present.
    fn extend(&self, quads: Vec<Quad>) -> Result<usize, StorageError>;

    /// Creates an empty named graph in the storage.
    fn insert_named_graph(&self, graph_name: NamedOrBlankNodeRef<'_>)
        -> Result<bool, StorageError>;

    /// Removes the given quad from the storage.
    fn remove(&self, quad: QuadRef<'_>) -> Result<bool, StorageError>;

    /// Removes the entire named graph from the storage.
    fn remove_named_graph(&self, graph_name: NamedOrBlankNodeRef<'_>)
        -> Result<bool, StorageError>;

    /// Clears the entire graph.
    fn clear_graph(&self, graph_name: GraphNameRef<'_>) -> Result<(), StorageError>;

    /// Clears the entire storage.
    fn clear(&self) -> Result<(), StorageError>;
}
