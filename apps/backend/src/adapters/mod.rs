//! Storage adapters behind the repository traits.

pub mod memory;

pub use memory::MemoryStore;
