//! Contains storage layer implementations for RDF Loom.
//!
//! Currently, the only storage is the in-memory [MemQuadStorage](memory::MemQuadStorage).

pub mod memory;
