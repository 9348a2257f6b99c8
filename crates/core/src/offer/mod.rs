mod error;
mod flatten;
mod mock_data;
mod operations;
mod requests;
mod types;

pub use error::{FlattenError, InvalidOfferKind, OfferError};
pub use flatten::{flatten_by_priority, flatten_with_resolution, DEFAULT_RESOLUTION};
pub use mock_data::{generate_seed_offers, SEED_BRAND_ID, SEED_PARTNUMBER};
pub use operations::{
    build_timetable, build_timetable_with_resolution, filter_offers_by_scope, offer_at,
    validate_offer, MAX_PARTNUMBER_LEN,
};
pub use requests::CreateOfferRequest;
pub use types::{BrandId, Offer, OfferId, PriceListId, TimetableSlot};
