use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use super::error::{FlattenError, OfferError};
use super::flatten::{flatten_by_priority, flatten_with_resolution};
use super::types::{BrandId, Offer, TimetableSlot};

/// Longest part number accepted by [`validate_offer`].
pub const MAX_PARTNUMBER_LEN: usize = 64;

/// Validates an offer before it is persisted.
pub fn validate_offer(offer: &Offer) -> Result<(), OfferError> {
    if offer.partnumber.trim().is_empty() {
        return Err(OfferError::EmptyPartNumber);
    }
    if offer.partnumber.chars().count() > MAX_PARTNUMBER_LEN {
        return Err(OfferError::PartNumberTooLong);
    }
    if offer.end_date < offer.start_date {
        return Err(OfferError::InvalidDateRange);
    }
    if offer.price < Decimal::ZERO {
        return Err(OfferError::NegativePrice);
    }
    if !is_valid_currency(&offer.currency) {
        return Err(OfferError::InvalidCurrency(offer.currency.clone()));
    }
    Ok(())
}

/// Filters offers belonging to one (brand, part number) scope.
pub fn filter_offers_by_scope<'a, I>(
    offers: I,
    brand_id: BrandId,
    partnumber: &str,
) -> Vec<&'a Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    offers
        .into_iter()
        .filter(|offer| offer.in_scope(brand_id, partnumber))
        .collect()
}

/// Flattens offers and projects the timeline to consumer-facing slots.
pub fn build_timetable<I>(offers: I) -> Result<Vec<TimetableSlot>, FlattenError>
where
    I: IntoIterator<Item = Offer>,
{
    Ok(flatten_by_priority(offers)?
        .into_iter()
        .map(TimetableSlot::from)
        .collect())
}

/// Same as [`build_timetable`] with an explicit truncation unit.
pub fn build_timetable_with_resolution<I>(
    offers: I,
    resolution: Duration,
) -> Result<Vec<TimetableSlot>, FlattenError>
where
    I: IntoIterator<Item = Offer>,
{
    Ok(flatten_with_resolution(offers, resolution)?
        .into_iter()
        .map(TimetableSlot::from)
        .collect())
}

/// Finds the offer governing `instant` in a flattened timeline.
///
/// `timeline` must be sorted by start and disjoint, as returned by
/// [`flatten_by_priority`].
pub fn offer_at(timeline: &[Offer], instant: NaiveDateTime) -> Option<&Offer> {
    let idx = timeline.partition_point(|offer| offer.start_date <= instant);
    if idx == 0 {
        return None;
    }
    let candidate = &timeline[idx - 1];
    candidate.covers(instant).then_some(candidate)
}

/// Checks for a three-letter alphabetic currency code such as `EUR`.
fn is_valid_currency(currency: &str) -> bool {
    currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 14)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn valid_offer() -> Offer {
        Offer::new(1, 1, "0001002", at(0, 0), at(23, 59)).with_price(Decimal::new(3550, 2), "EUR")
    }

    #[test]
    fn test_validate_offer_accepts_valid() {
        assert!(validate_offer(&valid_offer()).is_ok());
    }

    #[test]
    fn test_validate_offer_blank_partnumber() {
        let mut offer = valid_offer();
        offer.partnumber = "   ".to_string();
        assert_eq!(validate_offer(&offer), Err(OfferError::EmptyPartNumber));
    }

    #[test]
    fn test_validate_offer_partnumber_too_long() {
        let mut offer = valid_offer();
        offer.partnumber = "x".repeat(MAX_PARTNUMBER_LEN + 1);
        assert_eq!(validate_offer(&offer), Err(OfferError::PartNumberTooLong));
    }

    #[test]
    fn test_validate_offer_inverted_dates() {
        let mut offer = valid_offer();
        offer.end_date = at(0, 0);
        offer.start_date = at(1, 0);
        assert_eq!(validate_offer(&offer), Err(OfferError::InvalidDateRange));
    }

    #[test]
    fn test_validate_offer_zero_length_window_ok() {
        let mut offer = valid_offer();
        offer.end_date = offer.start_date;
        assert!(validate_offer(&offer).is_ok());
    }

    #[test]
    fn test_validate_offer_negative_price() {
        let offer = valid_offer().with_price(Decimal::new(-1, 2), "EUR");
        assert_eq!(validate_offer(&offer), Err(OfferError::NegativePrice));
    }

    #[test]
    fn test_validate_offer_currency() {
        for bad in ["EU", "EURO", "E1R", ""] {
            let offer = valid_offer().with_price(Decimal::ONE, bad);
            assert_eq!(
                validate_offer(&offer),
                Err(OfferError::InvalidCurrency(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_filter_offers_by_scope() {
        let offers = vec![
            Offer::new(1, 1, "0001002", at(0, 0), at(1, 0)),
            Offer::new(2, 2, "0001002", at(0, 0), at(1, 0)),
            Offer::new(3, 1, "0001003", at(0, 0), at(1, 0)),
            Offer::new(4, 1, "0001002", at(2, 0), at(3, 0)),
        ];

        let filtered = filter_offers_by_scope(&offers, 1, "0001002");

        let ids: Vec<_> = filtered.iter().map(|o| o.offer_id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_build_timetable() {
        let offers = vec![
            Offer::new(1, 1, "p", at(10, 0), at(12, 0)).with_price(Decimal::new(1000, 2), "EUR"),
            Offer::new(2, 1, "p", at(11, 0), at(13, 0))
                .with_priority(1)
                .with_price(Decimal::new(800, 2), "EUR"),
        ];

        let slots = build_timetable(offers).unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].from, at(10, 0));
        assert_eq!(slots[0].until, at(10, 59) + Duration::seconds(59));
        assert_eq!(slots[0].price, Decimal::new(1000, 2));
        assert_eq!(slots[1].from, at(11, 0));
        assert_eq!(slots[1].until, at(13, 0));
        assert_eq!(slots[1].price, Decimal::new(800, 2));
    }

    #[test]
    fn test_build_timetable_with_resolution_rejects_zero() {
        let offers = vec![Offer::new(1, 1, "p", at(10, 0), at(12, 0))];
        assert!(build_timetable_with_resolution(offers, Duration::zero()).is_err());
    }

    #[test]
    fn test_offer_at() {
        let timeline = vec![
            Offer::new(1, 1, "p", at(9, 0), at(10, 0)),
            Offer::new(2, 1, "p", at(11, 0), at(12, 0)),
        ];

        assert_eq!(offer_at(&timeline, at(8, 59)), None);
        assert_eq!(offer_at(&timeline, at(9, 0)).map(|o| o.offer_id), Some(1));
        assert_eq!(offer_at(&timeline, at(10, 0)).map(|o| o.offer_id), Some(1));
        assert_eq!(offer_at(&timeline, at(10, 30)), None);
        assert_eq!(offer_at(&timeline, at(11, 30)).map(|o| o.offer_id), Some(2));
        assert_eq!(offer_at(&timeline, at(12, 1)), None);
        assert_eq!(offer_at(&[], at(12, 0)), None);
    }
}
