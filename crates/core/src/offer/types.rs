use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a stored offer.
pub type OfferId = i64;

/// Identifier of the brand an offer belongs to.
pub type BrandId = i32;

/// Identifier of the price list an offer was published in.
pub type PriceListId = i32;

/// A priced, time-bounded, prioritized rule for a (brand, part-number) scope.
///
/// The validity window `[start_date, end_date]` is closed on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub offer_id: OfferId,
    pub brand_id: BrandId,
    #[serde(with = "crate::serde::offer_timestamp")]
    pub start_date: NaiveDateTime,
    #[serde(with = "crate::serde::offer_timestamp")]
    pub end_date: NaiveDateTime,
    pub price_list: PriceListId,
    pub partnumber: String,
    /// Higher values win when windows overlap.
    pub priority: i32,
    pub price: Decimal,
    /// Three-letter currency code.
    #[serde(rename = "curr")]
    pub currency: String,
}

impl Offer {
    /// Creates an offer for the given scope and window with priority 0,
    /// price list 1 and a zero EUR price.
    pub fn new(
        offer_id: OfferId,
        brand_id: BrandId,
        partnumber: impl Into<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Self {
        Self {
            offer_id,
            brand_id,
            start_date,
            end_date,
            price_list: 1,
            partnumber: partnumber.into(),
            priority: 0,
            price: Decimal::ZERO,
            currency: "EUR".to_string(),
        }
    }

    /// Sets the priority for this offer.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the price and currency for this offer.
    pub fn with_price(mut self, price: Decimal, currency: impl Into<String>) -> Self {
        self.price = price;
        self.currency = currency.into();
        self
    }

    /// Sets the price list for this offer.
    pub fn with_price_list(mut self, price_list: PriceListId) -> Self {
        self.price_list = price_list;
        self
    }

    /// Returns a copy of this offer ending at `end_date`.
    pub fn ending_at(&self, end_date: NaiveDateTime) -> Self {
        Self {
            end_date,
            ..self.clone()
        }
    }

    /// Returns true if the instant falls inside the closed validity window.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }

    /// Returns true if both closed windows share at least one instant.
    pub fn overlaps(&self, other: &Offer) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Returns true if the offer belongs to the given brand and part number.
    pub fn in_scope(&self, brand_id: BrandId, partnumber: &str) -> bool {
        self.brand_id == brand_id && self.partnumber == partnumber
    }
}

/// One interval of a flattened timetable, as exposed to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSlot {
    #[serde(with = "crate::serde::offer_timestamp")]
    pub from: NaiveDateTime,
    #[serde(with = "crate::serde::offer_timestamp")]
    pub until: NaiveDateTime,
    pub price: Decimal,
}

impl From<&Offer> for TimetableSlot {
    fn from(offer: &Offer) -> Self {
        Self {
            from: offer.start_date,
            until: offer.end_date,
            price: offer.price,
        }
    }
}

impl From<Offer> for TimetableSlot {
    fn from(offer: Offer) -> Self {
        Self::from(&offer)
    }
}
