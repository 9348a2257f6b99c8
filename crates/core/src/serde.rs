//! Serde helpers for offer timestamps.
//!
//! Offer windows are local calendar timestamps without an offset. They are
//! written as ISO 8601 (`2020-06-14T10:00:00`). On input the legacy feed
//! format (`2020-06-14-10.00.00`) is accepted too.

use chrono::NaiveDateTime;

/// Legacy `YYYY-MM-DD-HH.MM.SS` format used by older price feeds.
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H.%M.%S";

/// Output format for offer timestamps. Fractional seconds are only written
/// when present.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses an offer timestamp in ISO 8601 or legacy feed format.
pub fn parse_offer_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim();
    s.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT))
}

/// Formats an offer timestamp for the wire and for storage.
pub fn format_offer_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// `#[serde(with = "crate::serde::offer_timestamp")]` adapter.
pub mod offer_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_offer_timestamp(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_offer_timestamp(&s).map_err(serde::de::Error::custom)
    }
}
