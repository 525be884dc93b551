//! In-memory implementations of the repository ports.

mod store;

pub use store::InMemoryStore;
