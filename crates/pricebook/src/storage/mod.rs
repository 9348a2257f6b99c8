//! Storage backend implementations.
//!
//! Concrete implementations of [`pricebook_core::storage::OfferRepository`],
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local storage, lost on restart
//! - `sqlite`: SQLite storage using `rusqlite` and `tokio-rusqlite`
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p pricebook --no-default-features --features sqlite
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p pricebook --no-default-features --features sqlite"
);

// Router tests run against the in-memory backend whatever the feature set.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
