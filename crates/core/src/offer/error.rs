use thiserror::Error;

use super::OfferId;

/// Errors that can occur when validating an offer before it is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OfferError {
    #[error("Part number cannot be empty")]
    EmptyPartNumber,
    #[error("Part number too long (max 64 characters)")]
    PartNumberTooLong,
    #[error("End date must be after or equal to start date")]
    InvalidDateRange,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
}

/// Why a single offer was rejected by the flattener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOfferKind {
    /// `start_date` is after `end_date`.
    InvertedRange,
}

impl std::fmt::Display for InvalidOfferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidOfferKind::InvertedRange => write!(f, "start date is after end date"),
        }
    }
}

/// Errors raised while flattening a set of offers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Invalid offer {offer_id} at position {index}: {kind}")]
    InvalidOffer {
        index: usize,
        offer_id: OfferId,
        kind: InvalidOfferKind,
    },
    #[error("Resolution must be positive, got {0}")]
    InvalidResolution(chrono::Duration),
}
