//! API to access an in-memory [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset).
//!
//! The entry point of the module is the [`Store`] struct.
//!
//! Usage example:
//! ```
//! use rdf_loom::model::*;
//! use rdf_loom::sparql::QueryResults;
//! use rdf_loom::store::Store;
//!
//! let store = Store::default();
//!
//! // insertion
//! let ex = NamedNode::new("http://example.com")?;
//! let quad = Quad::new(ex.clone(), ex.clone(), ex.clone(), GraphName::DefaultGraph);
//! store.insert(&quad)?;
//!
//! // quad filter
//! let results = store
//!     .quads_for_pattern(None, None, None, None)
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(vec![quad], results);
//!
//! // SPARQL query
//! if let QueryResults::Solutions(mut solutions) = store.query("SELECT ?s WHERE { ?s ?p ?o }")? {
//!     assert_eq!(solutions.next().transpose()?.and_then(|s| s.get("s").cloned()), Some(ex.into()));
//! };
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::{LoaderError, QueryError};
use oxrdfio::RdfParser;
use rdf_loom_common::error::StorageError;
use rdf_loom_common::{QuadIter, QuadPatternEvaluator, QuadStorage};
use rdf_loom_engine::sparql::error::{QueryEvaluationError, QueryPreparationError};
use rdf_loom_engine::sparql::{
    evaluate_query, prepare_query, prepare_update, Bindings, QueryOptions,
};
use rdf_loom_engine::QueryResults;
use rdf_loom_logical::{Namespaces, Query, Update};
use rdf_loom_model::{
    GraphNameRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef,
    SubjectRef, TermRef,
};
use rdf_loom_storage::memory::MemQuadStorage;
use std::io::Read;
use std::sync::Arc;

/// The prefixes every [Store] starts with.
const DEFAULT_NAMESPACES: [(&str, &str); 4] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
];

/// An in-memory [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset) store.
///
/// The store can be queried using [SPARQL](https://www.w3.org/TR/sparql11-query). Clones of a
/// store share the same quads.
#[derive(Clone)]
pub struct Store {
    storage: Arc<MemQuadStorage>,
    namespaces: Namespaces,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty [Store] with a [MemQuadStorage] as backing storage.
    ///
    /// The prefixes `rdf`, `rdfs`, `xsd` and `owl` are declared for all queries.
    pub fn new() -> Self {
        let mut namespaces = Namespaces::new();
        for (prefix, namespace) in DEFAULT_NAMESPACES {
            namespaces.insert(prefix, namespace);
        }
        Self {
            storage: Arc::new(MemQuadStorage::new()),
            namespaces,
        }
    }

    /// Replaces the prefixes that are declared for all queries of this handle.
    #[must_use]
    pub fn with_namespaces(self, namespaces: Namespaces) -> Self {
        Self { namespaces, ..self }
    }

    /// The prefixes that are declared for all queries of this handle.
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Returns a reference to the underlying storage.
    pub fn storage(&self) -> &Arc<MemQuadStorage> {
        &self.storage
    }

    /// Parses and translates a query with the prefixes of this store.
    ///
    /// The returned [Query] can be evaluated any number of times with
    /// [query_with_bindings](Self::query_with_bindings).
    pub fn prepare_query(&self, query: &str) -> Result<Query, QueryPreparationError> {
        prepare_query(query, &self.namespaces, None)
    }

    /// Parses and translates an update request with the prefixes of this store.
    pub fn prepare_update(&self, update: &str) -> Result<Update, QueryPreparationError> {
        prepare_update(update, &self.namespaces, None)
    }

    /// Executes a [SPARQL](https://www.w3.org/TR/sparql11-query/) query.
    ///
    /// Usage example:
    /// ```
    /// use rdf_loom::model::*;
    /// use rdf_loom::sparql::QueryResults;
    /// use rdf_loom::store::Store;
    ///
    /// let store = Store::default();
    ///
    /// // insertions
    /// let ex = NamedNodeRef::new("http://example.com")?;
    /// store.insert(QuadRef::new(ex, ex, ex, GraphNameRef::DefaultGraph))?;
    ///
    /// // SPARQL query
    /// if let QueryResults::Solutions(mut solutions) = store.query("SELECT ?s WHERE { ?s ?p ?o }")? {
    ///     assert_eq!(
    ///         solutions.next().transpose()?.and_then(|s| s.get("s").cloned()),
    ///         Some(ex.into_owned().into())
    ///     );
    /// }
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn query(&self, query: &str) -> Result<QueryResults, QueryError> {
        self.query_opt(query, &QueryOptions::default())
    }

    /// Executes a [SPARQL](https://www.w3.org/TR/sparql11-query/) query with some options.
    ///
    /// Usage example with a custom function:
    /// ```
    /// use rdf_loom::model::*;
    /// use rdf_loom::sparql::{QueryOptions, QueryResults};
    /// use rdf_loom::store::Store;
    ///
    /// let store = Store::default();
    /// let options = QueryOptions::default().with_custom_function(
    ///     NamedNode::new("http://example.com/answer")?,
    ///     |_| Some(Literal::from(42).into()),
    /// );
    /// if let QueryResults::Solutions(mut solutions) = store.query_opt(
    ///     "SELECT (<http://example.com/answer>(1) AS ?a) WHERE {}",
    ///     &options,
    /// )? {
    ///     assert_eq!(
    ///         solutions.next().transpose()?.and_then(|s| s.get("a").cloned()),
    ///         Some(Literal::from(42).into())
    ///     );
    /// }
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn query_opt(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<QueryResults, QueryError> {
        let query = self.prepare_query(query)?;
        Ok(self.query_with_bindings(&query, Bindings::new(), options)?)
    }

    /// Evaluates a prepared query. `bindings` are bound before the evaluation starts and are
    /// part of every solution.
    pub fn query_with_bindings(
        &self,
        query: &Query,
        bindings: Bindings,
        options: &QueryOptions,
    ) -> Result<QueryResults, QueryEvaluationError> {
        evaluate_query(
            query,
            Arc::clone(&self.storage) as Arc<dyn QuadPatternEvaluator>,
            bindings,
            None,
            options,
        )
    }

    /// Retrieves quads with a filter on each quad component.
    ///
    /// Usage example:
    /// ```
    /// use rdf_loom::model::*;
    /// use rdf_loom::store::Store;
    ///
    /// let store = Store::default();
    ///
    /// // insertion
    /// let ex = NamedNode::new("http://example.com")?;
    /// let quad = Quad::new(ex.clone(), ex.clone(), ex.clone(), GraphName::DefaultGraph);
    /// store.insert(&quad)?;
    ///
    /// // quad filter by object
    /// let results = store
    ///     .quads_for_pattern(None, None, Some((&ex).into()), None)
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(vec![quad], results);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn quads_for_pattern(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph_name: Option<GraphNameRef<'_>>,
    ) -> QuadIter<'_> {
        self.storage
            .quads_for_pattern(subject, predicate, object, graph_name)
    }

    /// Checks if this store contains a given quad.
    pub fn contains<'a>(&self, quad: impl Into<QuadRef<'a>>) -> Result<bool, StorageError> {
        let quad = quad.into();
        let mut matches = self.storage.quads_for_pattern(
            Some(quad.subject),
            Some(quad.predicate),
            Some(quad.object),
            Some(quad.graph_name),
        );
        Ok(matches.next().transpose()?.is_some())
    }

    /// Returns the number of quads in the store.
    pub fn len(&self) -> Result<usize, StorageError> {
        self.storage.len()
    }

    /// Returns if the store is empty.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Loads an RDF file into the store.
    ///
    /// Blank nodes are renamed, so loading the same file twice adds its blank node quads twice.
    ///
    /// Usage example:
    /// ```
    /// use oxrdfio::RdfFormat;
    /// use rdf_loom::model::*;
    /// use rdf_loom::store::Store;
    ///
    /// let store = Store::default();
    ///
    /// // a dataset file
    /// let file = b"<http://example.com> <http://example.com> <http://example.com> <http://example.com/g> .";
    /// store.load_from_reader(RdfFormat::NQuads, file.as_ref())?;
    ///
    /// // a graph file with a base IRI
    /// let file = b"<> <> <> .";
    /// store.load_from_reader(
    ///     oxrdfio::RdfParser::from_format(RdfFormat::Turtle)
    ///         .with_base_iri("http://example.com")?
    ///         .without_named_graphs(),
    ///     file.as_ref(),
    /// )?;
    ///
    /// // we inspect the store contents
    /// let ex = NamedNodeRef::new("http://example.com")?;
    /// assert!(store.contains(QuadRef::new(ex, ex, ex, GraphNameRef::DefaultGraph))?);
    /// assert!(store.contains(QuadRef::new(ex, ex, ex, NamedNodeRef::new("http://example.com/g")?))?);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_from_reader(
        &self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<(), LoaderError> {
        let quads = parser
            .into()
            .rename_blank_nodes()
            .for_reader(reader)
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self.storage.extend(quads)?;
        tracing::debug!(inserted, "Loaded quads");
        Ok(())
    }

    /// Adds a quad to this store.
    ///
    /// Returns `true` if the quad was not already in the store.
    pub fn insert<'a>(&self, quad: impl Into<QuadRef<'a>>) -> Result<bool, StorageError> {
        let quad = vec![quad.into().into_owned()];
        self.storage.extend(quad).map(|inserted| inserted > 0)
    }

    /// Adds a set of quads to this store.
    pub fn extend(
        &self,
        quads: impl IntoIterator<Item = impl Into<Quad>>,
    ) -> Result<(), StorageError> {
        let quads = quads.into_iter().map(Into::into).collect::<Vec<_>>();
        self.storage.extend(quads)?;
        Ok(())
    }

    /// Removes a quad from this store.
    ///
    /// Returns `true` if the quad was in the store and has been removed.
    pub fn remove<'a>(&self, quad: impl Into<QuadRef<'a>>) -> Result<bool, StorageError> {
        self.storage.remove(quad.into())
    }

    /// Returns all the named graphs of the store.
    pub fn named_graphs(&self) -> Result<Vec<NamedOrBlankNode>, StorageError> {
        self.storage.named_graphs()
    }

    /// Checks if the store contains a given graph.
    pub fn contains_named_graph<'a>(
        &self,
        graph_name: impl Into<NamedOrBlankNodeRef<'a>>,
    ) -> Result<bool, StorageError> {
        self.storage.contains_named_graph(graph_name.into())
    }

    /// Clears the store.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear()
    }
}
