//! Implementations of ports (hexagonal adapters).

pub mod memory;

pub use memory::MemoryRecordStore;
