//! In-memory storage backend.
//!
//! Keeps offers in a `BTreeMap` behind a `tokio::sync::RwLock`. Nothing is
//! persisted; data is lost when the repository is dropped.

mod repository;

pub use repository::InMemoryRepository;
