use crate::memory::object_id::EncodedObjectId;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Represents a quad with encoded terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct EncodedQuad {
    /// The graph name.
    pub graph_name: EncodedObjectId,
    /// The subject.
    pub subject: EncodedObjectId,
    /// The predicate.
    pub predicate: EncodedObjectId,
    /// The object.
    pub object: EncodedObjectId,
}

impl EncodedQuad {
    /// Returns the components of this quad in the order of an index with the given `components`.
    fn for_index(&self, components: IndexComponents) -> IndexQuad {
        IndexQuad(components.0.map(|component| self.component(component)))
    }

    fn component(&self, component: IndexComponent) -> EncodedObjectId {
        match component {
            IndexComponent::GraphName => self.graph_name,
            IndexComponent::Subject => self.subject,
            IndexComponent::Predicate => self.predicate,
            IndexComponent::Object => self.object,
        }
    }
}

/// A quad pattern with encoded terms. [None] is a wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct EncodedQuadPattern {
    pub graph_name: Option<EncodedObjectId>,
    pub subject: Option<EncodedObjectId>,
    pub predicate: Option<EncodedObjectId>,
    pub object: Option<EncodedObjectId>,
}

impl EncodedQuadPattern {
    fn component(&self, component: IndexComponent) -> Option<EncodedObjectId> {
        match component {
            IndexComponent::GraphName => self.graph_name,
            IndexComponent::Subject => self.subject,
            IndexComponent::Predicate => self.predicate,
            IndexComponent::Object => self.object,
        }
    }

    fn matches(&self, quad: &EncodedQuad) -> bool {
        IndexComponent::ALL.iter().all(|component| {
            self.component(*component)
                .map_or(true, |id| id == quad.component(*component))
        })
    }
}

/// A quad that is sorted for some index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct IndexQuad([EncodedObjectId; 4]);

impl IndexQuad {
    fn into_encoded_quad(self, components: IndexComponents) -> EncodedQuad {
        let mut quad = EncodedQuad {
            graph_name: EncodedObjectId::MIN,
            subject: EncodedObjectId::MIN,
            predicate: EncodedObjectId::MIN,
            object: EncodedObjectId::MIN,
        };
        for (component, id) in components.0.iter().zip(self.0) {
            match component {
                IndexComponent::GraphName => quad.graph_name = id,
                IndexComponent::Subject => quad.subject = id,
                IndexComponent::Predicate => quad.predicate = id,
                IndexComponent::Object => quad.object = id,
            }
        }
        quad
    }
}

/// Represents what part of an RDF quad is indexed at the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexComponent {
    /// The graph name
    GraphName,
    /// The subject
    Subject,
    /// The predicate
    Predicate,
    /// The object
    Object,
}

impl IndexComponent {
    const ALL: [IndexComponent; 4] = [
        IndexComponent::GraphName,
        IndexComponent::Subject,
        IndexComponent::Predicate,
        IndexComponent::Object,
    ];
}

impl Display for IndexComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexComponent::GraphName => write!(f, "G"),
            IndexComponent::Subject => write!(f, "S"),
            IndexComponent::Predicate => write!(f, "P"),
            IndexComponent::Object => write!(f, "O"),
        }
    }
}

/// Represents a list of *disjunct* index components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexComponents([IndexComponent; 4]);

impl IndexComponents {
    /// A GSPO index.
    pub const GSPO: IndexComponents = IndexComponents([
        IndexComponent::GraphName,
        IndexComponent::Subject,
        IndexComponent::Predicate,
        IndexComponent::Object,
    ]);

    /// A GPOS index.
    pub const GPOS: IndexComponents = IndexComponents([
        IndexComponent::GraphName,
        IndexComponent::Predicate,
        IndexComponent::Object,
        IndexComponent::Subject,
    ]);

    /// A GOSP index.
    pub const GOSP: IndexComponents = IndexComponents([
        IndexComponent::GraphName,
        IndexComponent::Object,
        IndexComponent::Subject,
        IndexComponent::Predicate,
    ]);

    /// Returns a reference to the inner array.
    pub fn inner(&self) -> &[IndexComponent; 4] {
        &self.0
    }
}

impl Display for IndexComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for component in self.0.iter() {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// A single sorted index over all quads.
#[derive(Debug)]
struct MemQuadIndex {
    components: IndexComponents,
    content: BTreeSet<IndexQuad>,
}

impl MemQuadIndex {
    fn new(components: IndexComponents) -> Self {
        Self {
            components,
            content: BTreeSet::new(),
        }
    }

    /// Returns how many leading components of this index are bound in `pattern`. A longer bound
    /// prefix narrows the range scan.
    fn compute_scan_score(&self, pattern: &EncodedQuadPattern) -> usize {
        self.components
            .0
            .iter()
            .take_while(|component| pattern.component(**component).is_some())
            .count()
    }

    fn scan(&self, pattern: &EncodedQuadPattern) -> Vec<EncodedQuad> {
        let mut from = [EncodedObjectId::MIN; 4];
        let mut to = [EncodedObjectId::MAX; 4];
        for (i, component) in self.components.0.iter().enumerate() {
            match pattern.component(*component) {
                Some(id) => {
                    from[i] = id;
                    to[i] = id;
                }
                None => break,
            }
        }

        self.content
            .range(IndexQuad(from)..=IndexQuad(to))
            .map(|quad| quad.into_encoded_quad(self.components))
            .filter(|quad| pattern.matches(quad))
            .collect()
    }
}

/// Represents a set of multiple indexes, each of which indexes a different ordering of the quad
/// components (e.g., GSPO, GPOS). This is necessary as different quad patterns require different
/// index structures.
///
/// For example, the pattern `<S> <P> ?o` can be best served by having an SPO index. The scan would
/// look up `<S>`, then `<P>`, and lastly enumerate the entries and bind them to `?o`. However,
/// the pattern `?s <P> <O>` cannot be efficiently evaluated with an SPO index. For this pattern,
/// the POS index is chosen.
#[derive(Debug)]
pub(super) struct IndexPermutations {
    indexes: Vec<MemQuadIndex>,
}

impl Default for IndexPermutations {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPermutations {
    /// Creates a new [IndexPermutations] with a GSPO, GPOS, and GOSP index.
    pub fn new() -> Self {
        Self {
            indexes: vec![
                MemQuadIndex::new(IndexComponents::GSPO),
                MemQuadIndex::new(IndexComponents::GPOS),
                MemQuadIndex::new(IndexComponents::GOSP),
            ],
        }
    }

    /// Chooses the index for scanning the given `pattern`.
    pub fn choose_index(&self, pattern: &EncodedQuadPattern) -> IndexComponents {
        self.choose(pattern)
            .map_or(IndexComponents::GSPO, |index| index.components)
    }

    fn choose(&self, pattern: &EncodedQuadPattern) -> Option<&MemQuadIndex> {
        self.indexes
            .iter()
            .rev() // Prefer GSPO (max by uses the last on equality)
            .max_by_key(|index| index.compute_scan_score(pattern))
    }

    pub fn len(&self) -> usize {
        self.indexes.first().map_or(0, |index| index.content.len())
    }

    pub fn contains(&self, quad: &EncodedQuad) -> bool {
        self.indexes.first().is_some_and(|index| {
            index.content.contains(&quad.for_index(index.components))
        })
    }

    /// Inserts the quad into all indexes. Returns whether the quad was new.
    pub fn insert(&mut self, quad: &EncodedQuad) -> bool {
        let mut inserted = false;
        for index in self.indexes.iter_mut() {
            inserted = index.content.insert(quad.for_index(index.components));
        }
        inserted
    }

    /// Removes the quad from all indexes. Returns whether the quad was present.
    pub fn remove(&mut self, quad: &EncodedQuad) -> bool {
        let mut removed = false;
        for index in self.indexes.iter_mut() {
            removed = index.content.remove(&quad.for_index(index.components));
        }
        removed
    }

    /// Returns all quads matching `pattern`.
    pub fn scan(&self, pattern: &EncodedQuadPattern) -> Vec<EncodedQuad> {
        self.choose(pattern)
            .map(|index| index.scan(pattern))
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        for index in self.indexes.iter_mut() {
            index.content.clear();
        }
    }
}
