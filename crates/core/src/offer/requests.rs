//! API request types for offer operations.
//!
//! Pure data types shared by the server and its tests. Timestamps go through
//! [`crate::serde::offer_timestamp`] so both ISO 8601 and the legacy feed
//! format are accepted.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{BrandId, Offer, OfferId, PriceListId};

/// Request payload for creating a new offer.
///
/// `offerId` is optional; when absent the server allocates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<OfferId>,
    pub brand_id: BrandId,
    #[serde(with = "crate::serde::offer_timestamp")]
    pub start_date: NaiveDateTime,
    #[serde(with = "crate::serde::offer_timestamp")]
    pub end_date: NaiveDateTime,
    #[serde(default = "default_price_list")]
    pub price_list: PriceListId,
    pub partnumber: String,
    #[serde(default)]
    pub priority: i32,
    pub price: Decimal,
    #[serde(rename = "curr")]
    pub currency: String,
}

fn default_price_list() -> PriceListId {
    1
}

impl CreateOfferRequest {
    /// Builds the domain offer, stored under `offer_id`.
    pub fn into_offer(self, offer_id: OfferId) -> Offer {
        Offer {
            offer_id,
            brand_id: self.brand_id,
            start_date: self.start_date,
            end_date: self.end_date,
            price_list: self.price_list,
            partnumber: self.partnumber,
            priority: self.priority,
            price: self.price,
            currency: self.currency,
        }
    }
}

impl From<&Offer> for CreateOfferRequest {
    fn from(offer: &Offer) -> Self {
        Self {
            offer_id: Some(offer.offer_id),
            brand_id: offer.brand_id,
            start_date: offer.start_date,
            end_date: offer.end_date,
            price_list: offer.price_list,
            partnumber: offer.partnumber.clone(),
            priority: offer.priority,
            price: offer.price,
            currency: offer.currency.clone(),
        }
    }
}
