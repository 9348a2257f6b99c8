use async_trait::async_trait;

use crate::offer::{BrandId, Offer, OfferId};

use super::Result;

/// Repository for offer persistence.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Gets an offer by its ID.
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>>;

    /// Lists every stored offer, ordered by ID.
    async fn list_offers(&self) -> Result<Vec<Offer>>;

    /// Gets all offers for one brand and part number.
    async fn get_offers_by_scope(&self, brand_id: BrandId, partnumber: &str)
        -> Result<Vec<Offer>>;

    /// Returns an unused offer ID (one past the current maximum).
    async fn next_offer_id(&self) -> Result<OfferId>;

    /// Stores a new offer. Fails with `AlreadyExists` if the ID is taken.
    async fn create_offer(&self, offer: &Offer) -> Result<()>;

    /// Stores a new offer under the next free ID, returning the stored offer.
    ///
    /// The ID carried by `offer` is ignored. Allocation and insert happen
    /// atomically, so concurrent callers never receive the same ID.
    async fn create_offer_with_next_id(&self, offer: Offer) -> Result<Offer>;

    /// Deletes an offer by its ID. Fails with `NotFound` if absent.
    async fn delete_offer(&self, id: OfferId) -> Result<()>;

    /// Deletes every offer, returning how many were removed.
    async fn delete_all_offers(&self) -> Result<u64>;
}
