use std::fmt::{Display, Formatter};

/// The id of the default graph. No term is ever mapped to this id.
pub(super) const DEFAULT_GRAPH_ID: EncodedObjectId = EncodedObjectId(0);

/// The encoded object id identifies a term within a single [MemQuadStorage](super::MemQuadStorage).
///
/// Ids are only meaningful in combination with the mapping that handed them out.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct EncodedObjectId(u32);

impl EncodedObjectId {
    pub const MIN: EncodedObjectId = EncodedObjectId(0);
    pub const MAX: EncodedObjectId = EncodedObjectId(u32::MAX);

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Option<EncodedObjectId> {
        self.0.checked_add(1).map(EncodedObjectId)
    }
}

impl From<u32> for EncodedObjectId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for EncodedObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
