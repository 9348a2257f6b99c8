//! Shared application state.
//!
//! Handlers receive a clone of [`AppState`]; the repository is a trait object
//! so the storage backend is picked by feature flag at build time.

use std::sync::Arc;

use pricebook_core::offer::generate_seed_offers;
use pricebook_core::storage::{OfferRepository, RepositoryError};

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Offer repository.
    pub offer_repo: Arc<dyn OfferRepository>,
    /// Runtime configuration.
    pub config: Config,
}

impl AppState {
    /// Creates an AppState around an existing repository.
    pub fn with_repository(offer_repo: Arc<dyn OfferRepository>, config: Config) -> Self {
        Self { offer_repo, config }
    }

    /// Stores the demo offers, skipping any whose id is already taken.
    ///
    /// Returns how many offers were inserted.
    pub async fn seed_demo_data(&self) -> anyhow::Result<usize> {
        let mut inserted = 0;
        for offer in generate_seed_offers() {
            match self.offer_repo.create_offer(&offer).await {
                Ok(()) => inserted += 1,
                Err(RepositoryError::AlreadyExists { .. }) => {
                    tracing::debug!(offer_id = offer.offer_id, "Seed offer already present");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(inserted, "Seeded demo offers");
        Ok(inserted)
    }
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            Ok(Self::with_repository(
                Arc::new(InMemoryRepository::new()),
                config.clone(),
            ))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage at `config.sqlite_path`.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite offer store");
            Ok(Self::with_repository(Arc::new(repo), config.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;

    fn state() -> AppState {
        AppState::with_repository(Arc::new(InMemoryRepository::new()), Config::default())
    }

    #[tokio::test]
    async fn test_seed_demo_data() {
        let state = state();

        assert_eq!(state.seed_demo_data().await.unwrap(), 4);
        assert_eq!(state.offer_repo.list_offers().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_seed_demo_data_is_idempotent() {
        let state = state();
        state.seed_demo_data().await.unwrap();

        assert_eq!(state.seed_demo_data().await.unwrap(), 0);
        assert_eq!(state.offer_repo.list_offers().await.unwrap().len(), 4);
    }
}
