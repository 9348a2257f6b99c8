//! Demo offers for seeding and tests.
//!
//! A small price history for one product: a season-long base price and
//! three higher priority promotions that cut into it.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::types::{BrandId, Offer};

/// Brand used by the demo data.
pub const SEED_BRAND_ID: BrandId = 1;

/// Part number used by the demo data.
pub const SEED_PARTNUMBER: &str = "0001002";

/// Generates the demo offers for [`SEED_BRAND_ID`] / [`SEED_PARTNUMBER`],
/// with ids starting at 1.
///
/// # Example
///
/// ```
/// use pricebook_core::offer::{flatten_by_priority, generate_seed_offers};
///
/// let offers = generate_seed_offers();
/// assert_eq!(offers.len(), 4);
///
/// let timeline = flatten_by_priority(offers).unwrap();
/// assert_eq!(timeline.len(), 4);
/// ```
pub fn generate_seed_offers() -> Vec<Offer> {
    let seed = |id, start, end, price_list, priority, cents| {
        Offer::new(id, SEED_BRAND_ID, SEED_PARTNUMBER, start, end)
            .with_price_list(price_list)
            .with_priority(priority)
            .with_price(Decimal::new(cents, 2), "EUR")
    };

    vec![
        seed(1, at(6, 14, 0, 0, 0), at(12, 31, 23, 59, 59), 1, 0, 3550),
        seed(2, at(6, 14, 15, 0, 0), at(6, 14, 18, 30, 0), 2, 1, 2545),
        seed(3, at(6, 15, 0, 0, 0), at(6, 15, 11, 0, 0), 3, 1, 3050),
        seed(4, at(6, 15, 16, 0, 0), at(12, 31, 23, 59, 59), 4, 1, 3895),
    ]
}

fn at(month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}
