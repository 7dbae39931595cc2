mod index;
mod object_id;
mod object_id_mapping;
mod storage;

pub use index::{IndexComponent, IndexComponents};
pub use object_id::EncodedObjectId;
pub use storage::MemQuadStorage;
