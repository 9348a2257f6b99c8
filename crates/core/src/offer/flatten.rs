//! Priority-based interval flattening for offers.
//!
//! Turns a bag of possibly overlapping offers into a timeline of disjoint
//! offers. Where two offers overlap the higher priority wins, truncating the
//! earlier offer one resolution unit before the winner starts. Overlapping
//! offers of equal priority are merged into the earlier one.
//!
//! This is part of the Functional Core - the input is consumed into a private
//! working copy and the trailing result element is only ever replaced by value.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDateTime};

use super::error::{FlattenError, InvalidOfferKind};
use super::types::Offer;

/// Default truncation unit: closed intervals end one second before the
/// dominating offer starts.
pub const DEFAULT_RESOLUTION: Duration = Duration::seconds(1);

/// Flattens offers into a sorted, non-overlapping timeline using the default
/// one second resolution.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricebook_core::offer::{flatten_by_priority, Offer};
///
/// let day = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
/// let base = Offer::new(1, 1, "0001002", day.and_hms_opt(10, 0, 0).unwrap(), day.and_hms_opt(12, 0, 0).unwrap());
/// let promo = Offer::new(2, 1, "0001002", day.and_hms_opt(11, 0, 0).unwrap(), day.and_hms_opt(13, 0, 0).unwrap())
///     .with_priority(1);
///
/// let timeline = flatten_by_priority(vec![base, promo]).unwrap();
/// assert_eq!(timeline.len(), 2);
/// assert_eq!(timeline[0].end_date, day.and_hms_opt(10, 59, 59).unwrap());
/// assert_eq!(timeline[1].offer_id, 2);
/// ```
pub fn flatten_by_priority<I>(offers: I) -> Result<Vec<Offer>, FlattenError>
where
    I: IntoIterator<Item = Offer>,
{
    flatten_with_resolution(offers, DEFAULT_RESOLUTION)
}

/// Flattens offers into a sorted, non-overlapping timeline, truncating by
/// `resolution` when a higher priority offer cuts into an earlier one.
///
/// Every offer is validated before sorting. The first offer whose start is
/// after its end fails the whole call with [`FlattenError::InvalidOffer`].
pub fn flatten_with_resolution<I>(
    offers: I,
    resolution: Duration,
) -> Result<Vec<Offer>, FlattenError>
where
    I: IntoIterator<Item = Offer>,
{
    if resolution <= Duration::zero() {
        return Err(FlattenError::InvalidResolution(resolution));
    }

    let mut working: Vec<Offer> = offers.into_iter().collect();
    validate_ranges(&working)?;

    let input_len = working.len();
    // Stable: equal (start, priority) keep input order.
    working.sort_by(compare_for_sweep);

    let mut result: Vec<Offer> = Vec::with_capacity(input_len);

    for current in working {
        let Some(last) = result.last() else {
            tracing::trace!(offer_id = current.offer_id, "append first offer");
            result.push(current);
            continue;
        };

        if current.start_date > last.end_date {
            tracing::trace!(offer_id = current.offer_id, "append disjoint offer");
            result.push(current);
            continue;
        }

        match current.priority.cmp(&last.priority) {
            Ordering::Greater if current.start_date > last.start_date => {
                let cut = truncation_point(last, &current, resolution);
                tracing::trace!(
                    truncated = last.offer_id,
                    by = current.offer_id,
                    until = %cut,
                    "truncate lower priority offer"
                );
                let truncated = last.ending_at(cut);
                replace_last(&mut result, truncated);
                result.push(current);
            }
            Ordering::Greater => {
                tracing::trace!(
                    replaced = last.offer_id,
                    by = current.offer_id,
                    "replace dominated offer"
                );
                replace_last(&mut result, current);
            }
            Ordering::Equal if current.end_date > last.end_date => {
                tracing::trace!(
                    kept = last.offer_id,
                    merged = current.offer_id,
                    until = %current.end_date,
                    "merge equal priority offer"
                );
                let extended = last.ending_at(current.end_date);
                replace_last(&mut result, extended);
            }
            Ordering::Equal | Ordering::Less => {
                tracing::trace!(
                    dropped = current.offer_id,
                    covered_by = last.offer_id,
                    "drop covered offer"
                );
            }
        }
    }

    tracing::debug!(input = input_len, output = result.len(), "flattened offers");

    Ok(result)
}

/// Orders by start ascending, then priority descending.
fn compare_for_sweep(a: &Offer, b: &Offer) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| b.priority.cmp(&a.priority))
}

/// End of `last` when `current` cuts into it: one `resolution` before
/// `current` starts, or one nanosecond before when a whole resolution step
/// would fall before `last` starts.
///
/// Requires `current.start_date > last.start_date`.
fn truncation_point(last: &Offer, current: &Offer, resolution: Duration) -> NaiveDateTime {
    current
        .start_date
        .checked_sub_signed(resolution)
        .filter(|cut| *cut >= last.start_date)
        .unwrap_or_else(|| current.start_date - Duration::nanoseconds(1))
}

fn validate_ranges(offers: &[Offer]) -> Result<(), FlattenError> {
    match offers
        .iter()
        .position(|offer| offer.start_date > offer.end_date)
    {
        Some(index) => Err(FlattenError::InvalidOffer {
            index,
            offer_id: offers[index].offer_id,
            kind: InvalidOfferKind::InvertedRange,
        }),
        None => Ok(()),
    }
}

fn replace_last(result: &mut Vec<Offer>, replacement: Offer) {
    result.pop();
    result.push(replacement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 14)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn offer(id: i64, start: NaiveDateTime, end: NaiveDateTime, priority: i32) -> Offer {
        Offer::new(id, 1, "0001002", start, end)
            .with_priority(priority)
            .with_price(Decimal::new(id * 1000 + 50, 2), "EUR")
    }

    #[test]
    fn test_empty_input() {
        let result = flatten_by_priority(Vec::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_offer_unchanged() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let result = flatten_by_priority(vec![o1.clone()]).unwrap();
        assert_eq!(result, vec![o1]);
    }

    #[test]
    fn test_disjoint_offers_sorted_and_unmodified() {
        let o1 = offer(1, at(10, 0, 0), at(11, 0, 0), 0);
        let o2 = offer(2, at(12, 0, 0), at(13, 0, 0), 5);

        let result = flatten_by_priority(vec![o2.clone(), o1.clone()]).unwrap();

        assert_eq!(result, vec![o1, o2]);
    }

    #[test]
    fn test_adjacent_offers_touching_at_one_instant_overlap() {
        // Closed intervals share 11:00:00.
        let o1 = offer(1, at(10, 0, 0), at(11, 0, 0), 0);
        let o2 = offer(2, at(11, 0, 0), at(12, 0, 0), 1);

        let result = flatten_by_priority(vec![o1, o2.clone()]).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].end_date, at(10, 59, 59));
        assert_eq!(result[1], o2);
    }

    #[test]
    fn test_higher_priority_overlap_truncates_earlier() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let o2 = offer(2, at(11, 0, 0), at(13, 0, 0), 1);

        let result = flatten_by_priority(vec![o1.clone(), o2.clone()]).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].offer_id, 1);
        assert_eq!(result[0].start_date, at(10, 0, 0));
        assert_eq!(result[0].end_date, at(10, 59, 59));
        assert_eq!(result[0].price, o1.price);
        assert_eq!(result[1], o2);
    }

    #[test]
    fn test_equal_priority_overlap_merges() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let o2 = offer(2, at(11, 0, 0), at(13, 0, 0), 0);

        let result = flatten_by_priority(vec![o1.clone(), o2]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].offer_id, 1);
        assert_eq!(result[0].start_date, at(10, 0, 0));
        assert_eq!(result[0].end_date, at(13, 0, 0));
        assert_eq!(result[0].price, o1.price);
    }

    #[test]
    fn test_equal_priority_contained_offer_dropped() {
        let o1 = offer(1, at(10, 0, 0), at(13, 0, 0), 0);
        let o2 = offer(2, at(11, 0, 0), at(12, 0, 0), 0);

        let result = flatten_by_priority(vec![o1.clone(), o2]).unwrap();

        assert_eq!(result, vec![o1]);
    }

    #[test]
    fn test_lower_priority_overlap_dropped() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 1);
        let o2 = offer(2, at(11, 0, 0), at(13, 0, 0), 0);

        let result = flatten_by_priority(vec![o1.clone(), o2]).unwrap();

        assert_eq!(result, vec![o1]);
    }

    #[test]
    fn test_three_offer_chain() {
        let o1 = offer(1, at(9, 0, 0), at(11, 0, 0), 1);
        let o2 = offer(2, at(10, 30, 0), at(12, 0, 0), 2);
        let o3 = offer(3, at(12, 30, 0), at(13, 30, 0), 1);

        let result = flatten_by_priority(vec![o3.clone(), o1, o2.clone()]).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].offer_id, 1);
        assert_eq!(result[0].start_date, at(9, 0, 0));
        assert_eq!(result[0].end_date, at(10, 29, 59));
        assert_eq!(result[1], o2);
        assert_eq!(result[2], o3);
    }

    #[test]
    fn test_equal_start_higher_priority_wins_regardless_of_order() {
        let low = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let high = offer(2, at(10, 0, 0), at(11, 0, 0), 3);

        let forward = flatten_by_priority(vec![low.clone(), high.clone()]).unwrap();
        let backward = flatten_by_priority(vec![high.clone(), low]).unwrap();

        assert_eq!(forward, vec![high.clone()]);
        assert_eq!(backward, vec![high]);
    }

    #[test]
    fn test_equal_start_equal_priority_keeps_input_order() {
        let first = offer(1, at(10, 0, 0), at(11, 0, 0), 0);
        let second = offer(2, at(10, 0, 0), at(12, 0, 0), 0);

        let result = flatten_by_priority(vec![first, second]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].offer_id, 1);
        assert_eq!(result[0].end_date, at(12, 0, 0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let good = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let bad = offer(9, at(12, 0, 0), at(10, 0, 0), 0);

        let error = flatten_by_priority(vec![good, bad]).unwrap_err();

        assert_eq!(
            error,
            FlattenError::InvalidOffer {
                index: 1,
                offer_id: 9,
                kind: InvalidOfferKind::InvertedRange,
            }
        );
    }

    #[test]
    fn test_zero_length_offer_is_valid() {
        let instant = offer(1, at(10, 0, 0), at(10, 0, 0), 0);
        let result = flatten_by_priority(vec![instant.clone()]).unwrap();
        assert_eq!(result, vec![instant]);
    }

    #[test]
    fn test_input_not_mutated() {
        let offers = vec![
            offer(1, at(10, 0, 0), at(12, 0, 0), 0),
            offer(2, at(11, 0, 0), at(13, 0, 0), 1),
        ];
        let snapshot = offers.clone();

        let _ = flatten_by_priority(offers.iter().cloned()).unwrap();

        assert_eq!(offers, snapshot);
    }

    #[test]
    fn test_sub_second_resolution() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let o2 = offer(2, at(11, 0, 0), at(13, 0, 0), 1);

        let result = flatten_with_resolution(vec![o1, o2], Duration::milliseconds(1)).unwrap();

        let expected_end = NaiveDate::from_ymd_opt(2020, 6, 14)
            .unwrap()
            .and_hms_milli_opt(10, 59, 59, 999)
            .unwrap();
        assert_eq!(result[0].end_date, expected_end);
        assert_eq!(result[1].start_date, at(11, 0, 0));
    }

    #[test]
    fn test_sub_resolution_gap_truncates_to_nanosecond() {
        let day = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
        let start = day.and_hms_milli_opt(10, 0, 0, 500).unwrap();
        let o1 = offer(1, start, at(12, 0, 0), 0);
        let o2 = offer(2, at(10, 0, 1), at(11, 0, 0), 1);

        let result = flatten_by_priority(vec![o1, o2.clone()]).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].offer_id, 1);
        assert_eq!(result[0].start_date, start);
        assert_eq!(
            result[0].end_date,
            day.and_hms_nano_opt(10, 0, 0, 999_999_999).unwrap()
        );
        assert_eq!(result[1], o2);

        let only_first = day.and_hms_milli_opt(10, 0, 0, 700).unwrap();
        assert_eq!(
            crate::offer::offer_at(&result, only_first).map(|o| o.offer_id),
            Some(1)
        );
    }

    #[test]
    fn test_coarse_resolution_never_inverts_last() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);
        let o2 = offer(2, at(10, 0, 30), at(11, 0, 0), 1);

        let result = flatten_with_resolution(vec![o1, o2], Duration::minutes(5)).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].start_date, at(10, 0, 0));
        assert!(result[0].end_date < result[1].start_date);
        assert_eq!(result[0].end_date, at(10, 0, 30) - Duration::nanoseconds(1));
    }

    #[test]
    fn test_non_positive_resolution_rejected() {
        let o1 = offer(1, at(10, 0, 0), at(12, 0, 0), 0);

        assert_eq!(
            flatten_with_resolution(vec![o1.clone()], Duration::zero()).unwrap_err(),
            FlattenError::InvalidResolution(Duration::zero())
        );
        assert!(flatten_with_resolution(vec![o1], Duration::seconds(-1)).is_err());
    }

    #[test]
    fn test_flatten_is_idempotent_on_example() {
        let offers = vec![
            offer(1, at(9, 0, 0), at(11, 0, 0), 1),
            offer(2, at(10, 30, 0), at(12, 0, 0), 2),
            offer(3, at(11, 0, 0), at(14, 0, 0), 2),
            offer(4, at(12, 30, 0), at(13, 30, 0), 0),
        ];

        let once = flatten_by_priority(offers).unwrap();
        let twice = flatten_by_priority(once.clone()).unwrap();

        assert_eq!(once, twice);
    }
}
