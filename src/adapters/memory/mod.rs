//! In-memory adapters for offline use and testing.

mod in_memory_model;

pub use in_memory_model::InMemoryModel;
