//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pricebook_core::offer::{filter_offers_by_scope, BrandId, Offer, OfferId};
use pricebook_core::storage::{OfferRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Offers are keyed by ID, so listings come back in ID order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    offers: Arc<RwLock<BTreeMap<OfferId, Offer>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(offers: &BTreeMap<OfferId, Offer>) -> Result<OfferId> {
    let max = offers.keys().next_back().copied().unwrap_or(0);
    max.checked_add(1)
        .ok_or_else(|| RepositoryError::InvalidData("offer id space exhausted".to_string()))
}

#[async_trait]
impl OfferRepository for InMemoryRepository {
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>> {
        let offers = self.offers.read().await;
        Ok(offers.get(&id).cloned())
    }

    async fn list_offers(&self) -> Result<Vec<Offer>> {
        let offers = self.offers.read().await;
        Ok(offers.values().cloned().collect())
    }

    async fn get_offers_by_scope(
        &self,
        brand_id: BrandId,
        partnumber: &str,
    ) -> Result<Vec<Offer>> {
        let offers = self.offers.read().await;
        Ok(filter_offers_by_scope(offers.values(), brand_id, partnumber)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn next_offer_id(&self) -> Result<OfferId> {
        let offers = self.offers.read().await;
        next_id(&offers)
    }

    async fn create_offer(&self, offer: &Offer) -> Result<()> {
        let mut offers = self.offers.write().await;
        if offers.contains_key(&offer.offer_id) {
            return Err(RepositoryError::offer_already_exists(offer.offer_id));
        }
        offers.insert(offer.offer_id, offer.clone());
        Ok(())
    }

    async fn create_offer_with_next_id(&self, mut offer: Offer) -> Result<Offer> {
        let mut offers = self.offers.write().await;
        offer.offer_id = next_id(&offers)?;
        offers.insert(offer.offer_id, offer.clone());
        Ok(offer)
    }

    async fn delete_offer(&self, id: OfferId) -> Result<()> {
        let mut offers = self.offers.write().await;
        if offers.remove(&id).is_none() {
            return Err(RepositoryError::offer_not_found(id));
        }
        Ok(())
    }

    async fn delete_all_offers(&self) -> Result<u64> {
        let mut offers = self.offers.write().await;
        let removed = offers.len() as u64;
        offers.clear();
        Ok(removed)
    }
}
