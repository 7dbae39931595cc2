use rdf_loom_common::error::StorageError;
use rdf_loom_common::QuadPatternEvaluator;
use rdf_loom_logical::QueryDataset;
use rdf_loom_model::{
    GraphName, GraphNameRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, SubjectRef,
    TermRef, Triple,
};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// The graph that triple patterns are matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveGraph {
    /// The default graph of the dataset.
    Default,
    /// A named graph, selected by `GRAPH`.
    Named(NamedOrBlankNode),
}

/// The RDF dataset of a query evaluation on top of a storage.
///
/// Without a `FROM` clause, the default graph is the default graph of the storage (or the union
/// of all graphs if configured) and all named graphs of the storage are visible. A `FROM` clause
/// replaces the default graph with the merge of the given graphs. `FROM NAMED` restricts the
/// visible named graphs.
#[derive(Clone)]
pub struct DatasetView {
    storage: Arc<dyn QuadPatternEvaluator>,
    default: DefaultGraph,
    named: Option<Vec<NamedOrBlankNode>>,
}

#[derive(Clone)]
enum DefaultGraph {
    Storage,
    Union,
    Merge(Vec<GraphName>),
}

impl DatasetView {
    pub fn new(
        storage: Arc<dyn QuadPatternEvaluator>,
        dataset: Option<&QueryDataset>,
        default_graph_as_union: bool,
    ) -> Self {
        let (default, named) = match dataset {
            Some(dataset) => (
                DefaultGraph::Merge(
                    dataset
                        .default
                        .iter()
                        .cloned()
                        .map(GraphName::NamedNode)
                        .collect(),
                ),
                dataset
                    .named
                    .as_ref()
                    .map(|named| named.iter().cloned().map(NamedOrBlankNode::from).collect()),
            ),
            None if default_graph_as_union => (DefaultGraph::Union, None),
            None => (DefaultGraph::Storage, None),
        };
        Self {
            storage,
            default,
            named,
        }
    }

    /// Returns the triples of `graph` that match the pattern. [None] acts as a wildcard.
    ///
    /// If the default graph is merged from several graphs, triples contained in more than one of
    /// them are only returned once.
    pub fn triples_for_pattern(
        &self,
        graph: &ActiveGraph,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<Vec<Triple>, StorageError> {
        match graph {
            ActiveGraph::Named(name) => {
                if !self.is_visible_named_graph(name.as_ref()) {
                    return Ok(Vec::new());
                }
                self.scan(subject, predicate, object, Some(name_ref(name)))
            }
            ActiveGraph::Default => match &self.default {
                DefaultGraph::Storage => self.scan(
                    subject,
                    predicate,
                    object,
                    Some(GraphNameRef::DefaultGraph),
                ),
                DefaultGraph::Union => {
                    let triples = self.scan(subject, predicate, object, None)?;
                    Ok(deduplicate(triples))
                }
                DefaultGraph::Merge(graphs) => {
                    let mut triples = Vec::new();
                    for graph in graphs {
                        let graph = Some(graph.as_ref());
                        triples.extend(self.scan(subject, predicate, object, graph)?);
                    }
                    Ok(if graphs.len() > 1 {
                        deduplicate(triples)
                    } else {
                        triples
                    })
                }
            },
        }
    }

    /// The named graphs of the dataset, sorted so that `GRAPH ?g` visits them in a stable order.
    pub fn named_graphs(&self) -> Result<Vec<NamedOrBlankNode>, StorageError> {
        let mut graphs: Vec<NamedOrBlankNode> = match &self.named {
            Some(named) => {
                let mut seen = FxHashSet::default();
                named
                    .iter()
                    .filter(|graph| seen.insert(*graph))
                    .cloned()
                    .collect()
            }
            None => self.storage.named_graphs()?,
        };
        graphs.sort_unstable_by(|a, b| a.to_string().cmp(&b.to_string()));
        Ok(graphs)
    }

    /// Returns whether `graph` is a named graph of the dataset.
    pub fn contains_named_graph(
        &self,
        graph: NamedOrBlankNodeRef<'_>,
    ) -> Result<bool, StorageError> {
        if self.named.is_some() {
            return Ok(self.is_visible_named_graph(graph));
        }
        self.storage.contains_named_graph(graph)
    }

    fn is_visible_named_graph(&self, graph: NamedOrBlankNodeRef<'_>) -> bool {
        self.named
            .as_ref()
            .map_or(true, |named| named.iter().any(|g| g.as_ref() == graph))
    }

    fn scan(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph_name: Option<GraphNameRef<'_>>,
    ) -> Result<Vec<Triple>, StorageError> {
        self.storage
            .quads_for_pattern(subject, predicate, object, graph_name)
            .map(|quad| quad.map(Triple::from))
            .collect()
    }
}

fn name_ref(name: &NamedOrBlankNode) -> GraphNameRef<'_> {
    match name {
        NamedOrBlankNode::NamedNode(node) => node.as_ref().into(),
        NamedOrBlankNode::BlankNode(node) => node.as_ref().into(),
    }
}

fn deduplicate(triples: Vec<Triple>) -> Vec<Triple> {
    let mut seen = FxHashSet::default();
    triples
        .into_iter()
        .filter(|triple| seen.insert(triple.clone()))
        .collect()
}
