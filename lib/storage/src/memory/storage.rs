use crate::memory::index::{EncodedQuad, EncodedQuadPattern, IndexPermutations};
use crate::memory::object_id::{EncodedObjectId, DEFAULT_GRAPH_ID};
use crate::memory::object_id_mapping::MemObjectIdMapping;
use rdf_loom_common::error::{CorruptionError, StorageError};
use rdf_loom_common::{QuadIter, QuadPatternEvaluator, QuadStorage};
use rdf_loom_model::{
    GraphNameRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef,
    SubjectRef, TermRef,
};
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Formatter};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A memory-based quad storage.
///
/// All terms are mapped to object ids and the quads are kept in three sorted index permutations.
/// Reads and writes are synchronized with a [RwLock]. Readers materialize the matching quads
/// before releasing the lock, so an iterator returned from
/// [quads_for_pattern](QuadPatternEvaluator::quads_for_pattern) never observes concurrent writes.
#[derive(Default)]
pub struct MemQuadStorage {
    content: RwLock<MemStorageContent>,
}

#[derive(Debug, Default)]
struct MemStorageContent {
    /// Holds the mapping between terms and object ids.
    object_id_mapping: MemObjectIdMapping,
    /// The index permutations.
    indexes: IndexPermutations,
    /// The explicitly created named graphs. Graphs that only occur in quads are not included.
    named_graphs: FxHashSet<EncodedObjectId>,
}

impl MemQuadStorage {
    /// Creates a new empty [MemQuadStorage].
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemStorageContent>, StorageError> {
        self.content
            .read()
            .map_err(|_| CorruptionError::msg("The storage lock is poisoned.").into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemStorageContent>, StorageError> {
        self.content
            .write()
            .map_err(|_| CorruptionError::msg("The storage lock is poisoned.").into())
    }

    fn scan(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph_name: Option<GraphNameRef<'_>>,
    ) -> Result<Vec<Quad>, StorageError> {
        let content = self.read()?;
        let mapping = &content.object_id_mapping;

        // A term that has no id cannot be part of any quad.
        let pattern = EncodedQuadPattern {
            graph_name: match graph_name {
                Some(graph_name) => match mapping.try_get_encoded_graph_name(graph_name) {
                    Some(id) => Some(id),
                    None => return Ok(Vec::new()),
                },
                None => None,
            },
            subject: match subject {
                Some(subject) => match mapping.try_get_encoded_term(subject) {
                    Some(id) => Some(id),
                    None => return Ok(Vec::new()),
                },
                None => None,
            },
            predicate: match predicate {
                Some(predicate) => match mapping.try_get_encoded_term(predicate) {
                    Some(id) => Some(id),
                    None => return Ok(Vec::new()),
                },
                None => None,
            },
            object: match object {
                Some(object) => match mapping.try_get_encoded_term(object) {
                    Some(id) => Some(id),
                    None => return Ok(Vec::new()),
                },
                None => None,
            },
        };

        tracing::trace!(
            index = %content.indexes.choose_index(&pattern),
            "Scanning memory storage"
        );

        let quads = content
            .indexes
            .scan(&pattern)
            .into_iter()
            .map(|quad| content.decode_quad(&quad))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quads)
    }
}

impl MemStorageContent {
    fn encode_quad(&mut self, quad: QuadRef<'_>) -> Result<EncodedQuad, StorageError> {
        Ok(EncodedQuad {
            graph_name: self
                .object_id_mapping
                .encode_graph_name_intern(quad.graph_name)?,
            subject: self.object_id_mapping.encode_term_intern(quad.subject)?,
            predicate: self.object_id_mapping.encode_term_intern(quad.predicate)?,
            object: self.object_id_mapping.encode_term_intern(quad.object)?,
        })
    }

    fn try_get_encoded_quad(&self, quad: QuadRef<'_>) -> Option<EncodedQuad> {
        let mapping = &self.object_id_mapping;
        Some(EncodedQuad {
            graph_name: mapping.try_get_encoded_graph_name(quad.graph_name)?,
            subject: mapping.try_get_encoded_term(quad.subject)?,
            predicate: mapping.try_get_encoded_term(quad.predicate)?,
            object: mapping.try_get_encoded_term(quad.object)?,
        })
    }

    fn decode_quad(&self, quad: &EncodedQuad) -> Result<Quad, StorageError> {
        let mapping = &self.object_id_mapping;
        Ok(Quad::new(
            mapping.decode_subject(quad.subject)?,
            mapping.decode_predicate(quad.predicate)?,
            mapping.decode_term(quad.object)?.clone(),
            mapping.decode_graph_name(quad.graph_name)?,
        ))
    }

    fn encoded_graph_ids(&self) -> FxHashSet<EncodedObjectId> {
        let mut result = self.named_graphs.clone();
        result.extend(
            self.indexes
                .scan(&EncodedQuadPattern::default())
                .into_iter()
                .map(|quad| quad.graph_name)
                .filter(|graph| *graph != DEFAULT_GRAPH_ID),
        );
        result
    }

    fn quads_in_graph(&self, graph_name: EncodedObjectId) -> Vec<EncodedQuad> {
        self.indexes.scan(&EncodedQuadPattern {
            graph_name: Some(graph_name),
            ..EncodedQuadPattern::default()
        })
    }
}

impl Debug for MemQuadStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemQuadStorage").finish_non_exhaustive()
    }
}

impl QuadPatternEvaluator for MemQuadStorage {
    fn quads_for_pattern(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph_name: Option<GraphNameRef<'_>>,
    ) -> QuadIter<'_> {
        match self.scan(subject, predicate, object, graph_name) {
            Ok(quads) => Box::new(quads.into_iter().map(Ok)),
            Err(error) => Box::new(std::iter::once(Err(error))),
        }
    }

    fn named_graphs(&self) -> Result<Vec<NamedOrBlankNode>, StorageError> {
        let content = self.read()?;
        content
            .encoded_graph_ids()
            .into_iter()
            .map(|id| content.object_id_mapping.decode_named_graph(id))
            .collect()
    }

    fn contains_named_graph(
        &self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Result<bool, StorageError> {
        let content = self.read()?;
        let Some(id) = content.object_id_mapping.try_get_encoded_named_graph(graph_name) else {
            return Ok(false);
        };
        Ok(content.named_graphs.contains(&id) || !content.quads_in_graph(id).is_empty())
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.indexes.len())
    }
}

impl QuadStorage for MemQuadStorage {
    fn extend(&self, quads: Vec<Quad>) -> Result<usize, StorageError> {
        let mut content = self.write()?;
        let mut inserted = 0;
        for quad in &quads {
            let encoded = content.encode_quad(quad.as_ref())?;
            if content.indexes.insert(&encoded) {
                inserted += 1;
            }
        }
        tracing::debug!(inserted, total = quads.len(), "Inserted quads");
        Ok(inserted)
    }

    fn insert_named_graph(
        &self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Result<bool, StorageError> {
        let mut content = self.write()?;
        let id = content.object_id_mapping.encode_named_graph_intern(graph_name)?;
        Ok(content.named_graphs.insert(id))
    }

    fn remove(&self, quad: QuadRef<'_>) -> Result<bool, StorageError> {
        let mut content = self.write()?;
        let Some(encoded) = content.try_get_encoded_quad(quad) else {
            return Ok(false);
        };
        Ok(content.indexes.remove(&encoded))
    }

    fn remove_named_graph(
        &self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Result<bool, StorageError> {
        let mut content = self.write()?;
        let Some(id) = content.object_id_mapping.try_get_encoded_named_graph(graph_name) else {
            return Ok(false);
        };

        let quads = content.quads_in_graph(id);
        for quad in &quads {
            content.indexes.remove(quad);
        }
        let was_declared = content.named_graphs.remove(&id);
        Ok(was_declared || !quads.is_empty())
    }

    fn clear_graph(&self, graph_name: GraphNameRef<'_>) -> Result<(), StorageError> {
        let mut content = self.write()?;
        let Some(id) = content.object_id_mapping.try_get_encoded_graph_name(graph_name) else {
            return Ok(());
        };
        for quad in content.quads_in_graph(id) {
            content.indexes.remove(&quad);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut content = self.write()?;
        content.indexes.clear();
        content.named_graphs.clear();
        Ok(())
    }
}
