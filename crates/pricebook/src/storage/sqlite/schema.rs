//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS offers (
    offer_id INTEGER PRIMARY KEY,
    brand_id INTEGER NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    price_list INTEGER NOT NULL,
    partnumber TEXT NOT NULL,
    priority INTEGER NOT NULL,
    price TEXT NOT NULL,
    curr TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_offers_scope ON offers(brand_id, partnumber);
"#;

pub const INSERT_OFFER: &str = r#"
INSERT INTO offers (offer_id, brand_id, start_date, end_date, price_list, partnumber, priority, price, curr)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

/// Inserts under `MAX(offer_id) + 1` in one statement.
pub const INSERT_OFFER_WITH_NEXT_ID: &str = r#"
INSERT INTO offers (offer_id, brand_id, start_date, end_date, price_list, partnumber, priority, price, curr)
SELECT COALESCE(MAX(offer_id), 0) + 1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
FROM offers
"#;

pub const SELECT_OFFER_BY_ID: &str = r#"
SELECT offer_id, brand_id, start_date, end_date, price_list, partnumber, priority, price, curr
FROM offers
WHERE offer_id = ?1
"#;

pub const SELECT_ALL_OFFERS: &str = r#"
SELECT offer_id, brand_id, start_date, end_date, price_list, partnumber, priority, price, curr
FROM offers
ORDER BY offer_id ASC
"#;

pub const SELECT_OFFERS_BY_SCOPE: &str = r#"
SELECT offer_id, brand_id, start_date, end_date, price_list, partnumber, priority, price, curr
FROM offers
WHERE brand_id = ?1 AND partnumber = ?2
ORDER BY offer_id ASC
"#;

pub const SELECT_MAX_OFFER_ID: &str = r#"
SELECT COALESCE(MAX(offer_id), 0)
FROM offers
"#;

pub const DELETE_OFFER: &str = r#"
DELETE FROM offers
WHERE offer_id = ?1
"#;

pub const DELETE_ALL_OFFERS: &str = r#"
DELETE FROM offers
"#;
