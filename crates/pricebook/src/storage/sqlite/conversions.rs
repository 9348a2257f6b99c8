//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and offers.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::Row;
use rust_decimal::Decimal;

use pricebook_core::offer::Offer;
use pricebook_core::serde::{format_offer_timestamp, parse_offer_timestamp};

/// Convert a SQLite row to an Offer.
///
/// Expected columns: offer_id, brand_id, start_date, end_date, price_list,
/// partnumber, priority, price, curr
pub fn row_to_offer(row: &Row) -> rusqlite::Result<Offer> {
    let start_date: String = row.get(2)?;
    let end_date: String = row.get(3)?;
    let price: String = row.get(7)?;

    Ok(Offer {
        offer_id: row.get(0)?,
        brand_id: row.get(1)?,
        start_date: parse_timestamp(2, &start_date)?,
        end_date: parse_timestamp(3, &end_date)?,
        price_list: row.get(4)?,
        partnumber: row.get(5)?,
        priority: row.get(6)?,
        price: parse_price(7, &price)?,
        currency: row.get(8)?,
    })
}

/// Format a timestamp for SQLite storage.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    format_offer_timestamp(dt)
}

/// Format a price for SQLite storage. Stored as text to keep the scale.
pub fn format_price(price: &Decimal) -> String {
    price.to_string()
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    parse_offer_timestamp(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_price(idx: usize, s: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
