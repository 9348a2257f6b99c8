//! SQLite storage backend.
//!
//! Implements [`pricebook_core::storage::OfferRepository`] with `rusqlite`
//! for the queries and `tokio-rusqlite` to run them off the async runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
