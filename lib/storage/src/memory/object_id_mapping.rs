use crate::memory::object_id::{EncodedObjectId, DEFAULT_GRAPH_ID};
use rdf_loom_common::error::{CorruptionError, StorageError};
use rdf_loom_model::{
    GraphName, GraphNameRef, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Subject, Term,
    TermRef,
};
use rustc_hash::FxHashMap;

/// Maintains a mapping between RDF terms and object IDs in memory.
///
/// # Object IDs
///
/// Object IDs are allocated from a counter. The id `0` is reserved for the default graph, so the
/// first term receives the id `1`. Ids are never reused, even if all quads referring to a term
/// are removed.
#[derive(Debug)]
pub(super) struct MemObjectIdMapping {
    /// Contains the next free object id.
    next_id: EncodedObjectId,
    /// Maps object ids to terms.
    id2term: FxHashMap<EncodedObjectId, Term>,
    /// Maps terms to their object id.
    term2id: FxHashMap<Term, EncodedObjectId>,
}

impl Default for MemObjectIdMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl MemObjectIdMapping {
    /// Creates a new empty [MemObjectIdMapping].
    pub fn new() -> Self {
        Self {
            next_id: EncodedObjectId::from(1), // Start at 1 to account for Default Graph.
            id2term: FxHashMap::default(),
            term2id: FxHashMap::default(),
        }
    }

    /// Returns the id of `term`, allocating a new one if the term has not been seen before.
    pub fn encode_term_intern<'term>(
        &mut self,
        term: impl Into<TermRef<'term>>,
    ) -> Result<EncodedObjectId, StorageError> {
        let term = term.into().into_owned();
        if let Some(id) = self.term2id.get(&term) {
            return Ok(*id);
        }

        let id = self.next_id;
        self.next_id = id
            .next()
            .ok_or_else(|| CorruptionError::msg("Object id space is exhausted."))?;
        self.id2term.insert(id, term.clone());
        self.term2id.insert(term, id);
        Ok(id)
    }

    /// Returns the id of `graph_name`, allocating a new one if necessary.
    pub fn encode_graph_name_intern(
        &mut self,
        graph_name: GraphNameRef<'_>,
    ) -> Result<EncodedObjectId, StorageError> {
        match graph_name {
            GraphNameRef::NamedNode(nn) => self.encode_term_intern(nn),
            GraphNameRef::BlankNode(bnode) => self.encode_term_intern(bnode),
            GraphNameRef::DefaultGraph => Ok(DEFAULT_GRAPH_ID),
        }
    }

    pub fn encode_named_graph_intern(
        &mut self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Result<EncodedObjectId, StorageError> {
        match graph_name {
            NamedOrBlankNodeRef::NamedNode(nn) => self.encode_term_intern(nn),
            NamedOrBlankNodeRef::BlankNode(bnode) => self.encode_term_intern(bnode),
        }
    }

    /// Returns the id of `term` if it is known. Unknown terms cannot be part of any quad.
    pub fn try_get_encoded_term<'term>(
        &self,
        term: impl Into<TermRef<'term>>,
    ) -> Option<EncodedObjectId> {
        let term = term.into().into_owned();
        self.term2id.get(&term).copied()
    }

    pub fn try_get_encoded_named_graph(
        &self,
        graph_name: NamedOrBlankNodeRef<'_>,
    ) -> Option<EncodedObjectId> {
        match graph_name {
            NamedOrBlankNodeRef::NamedNode(nn) => self.try_get_encoded_term(nn),
            NamedOrBlankNodeRef::BlankNode(bnode) => self.try_get_encoded_term(bnode),
        }
    }

    /// Returns the id of `graph_name` if it is known.
    pub fn try_get_encoded_graph_name(
        &self,
        graph_name: GraphNameRef<'_>,
    ) -> Option<EncodedObjectId> {
        match graph_name {
            GraphNameRef::NamedNode(nn) => self.try_get_encoded_term(nn),
            GraphNameRef::BlankNode(bnode) => self.try_get_encoded_term(bnode),
            GraphNameRef::DefaultGraph => Some(DEFAULT_GRAPH_ID),
        }
    }

    /// Decodes the given `object_id`.
    ///
    /// # Error
    ///
    /// Returns an error if the id has never been handed out by this mapping.
    pub fn decode_term(&self, object_id: EncodedObjectId) -> Result<&Term, StorageError> {
        self.id2term.get(&object_id).ok_or_else(|| {
            CorruptionError::msg(format!("Unknown object id {object_id}.")).into()
        })
    }

    pub fn decode_subject(&self, object_id: EncodedObjectId) -> Result<Subject, StorageError> {
        match self.decode_term(object_id)? {
            Term::NamedNode(nn) => Ok(nn.clone().into()),
            Term::BlankNode(bnode) => Ok(bnode.clone().into()),
            _ => Err(CorruptionError::msg(format!(
                "Object id {object_id} does not refer to a valid subject."
            ))
            .into()),
        }
    }

    pub fn decode_predicate(
        &self,
        object_id: EncodedObjectId,
    ) -> Result<NamedNode, StorageError> {
        match self.decode_term(object_id)? {
            Term::NamedNode(nn) => Ok(nn.clone()),
            _ => Err(CorruptionError::msg(format!(
                "Object id {object_id} does not refer to a valid predicate."
            ))
            .into()),
        }
    }

    pub fn decode_named_graph(
        &self,
        object_id: EncodedObjectId,
    ) -> Result<NamedOrBlankNode, StorageError> {
        match self.decode_term(object_id)? {
            Term::NamedNode(nn) => Ok(nn.clone().into()),
            Term::BlankNode(bnode) => Ok(bnode.clone().into()),
            _ => Err(CorruptionError::msg(format!(
                "Object id {object_id} does not refer to a valid graph name."
            ))
            .into()),
        }
    }

    pub fn decode_graph_name(
        &self,
        object_id: EncodedObjectId,
    ) -> Result<GraphName, StorageError> {
        if object_id == DEFAULT_GRAPH_ID {
            return Ok(GraphName::DefaultGraph);
        }
        match self.decode_named_graph(object_id)? {
            NamedOrBlankNode::NamedNode(nn) => Ok(nn.into()),
            NamedOrBlankNode::BlankNode(bnode) => Ok(bnode.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::{BlankNode, Literal, NamedNodeRef};

    #[test]
    fn same_term_receives_same_id() {
        let mut mapping = MemObjectIdMapping::new();
        let ex = NamedNodeRef::new_unchecked("http://example.com/a");

        let first = mapping.encode_term_intern(ex).unwrap();
        let second = mapping.encode_term_intern(ex).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, DEFAULT_GRAPH_ID);
    }

    #[test]
    fn literals_with_different_datatypes_are_distinct() {
        let mut mapping = MemObjectIdMapping::new();
        let plain = Literal::new_simple_literal("1");
        let typed = Literal::new_typed_literal("1", rdf_loom_model::vocab::xsd::INTEGER);

        let plain_id = mapping.encode_term_intern(plain.as_ref()).unwrap();
        let typed_id = mapping.encode_term_intern(typed.as_ref()).unwrap();

        assert_ne!(plain_id, typed_id);
        assert_eq!(mapping.decode_term(typed_id).unwrap(), &Term::from(typed));
    }

    #[test]
    fn unknown_terms_are_not_allocated() {
        let mapping = MemObjectIdMapping::new();
        let bnode = BlankNode::default();
        assert_eq!(mapping.try_get_encoded_term(bnode.as_ref()), None);
        assert!(mapping.decode_term(EncodedObjectId::from(7)).is_err());
    }

    #[test]
    fn default_graph_round_trips() {
        let mut mapping = MemObjectIdMapping::new();
        let id = mapping
            .encode_graph_name_intern(GraphNameRef::DefaultGraph)
            .unwrap();
        assert_eq!(
            mapping.decode_graph_name(id).unwrap(),
            GraphName::DefaultGraph
        );
    }
}
