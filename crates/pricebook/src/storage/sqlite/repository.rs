//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use pricebook_core::offer::{BrandId, Offer, OfferId};
use pricebook_core::storage::{OfferRepository, RepositoryError, Result};

use super::conversions::{format_price, format_timestamp, row_to_offer};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based offer repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and ensures the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn query_offers<P>(&self, sql: &'static str, params: P) -> Result<Vec<Offer>>
    where
        P: rusqlite::Params + Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt.query_map(params, row_to_offer).map_err(wrap_err)?;

                let mut offers = Vec::new();
                for row_result in rows {
                    offers.push(row_result.map_err(wrap_err)?);
                }
                Ok(offers)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl OfferRepository for SqliteRepository {
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_OFFER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_offer) {
                    Ok(offer) => Ok(Some(offer)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn list_offers(&self) -> Result<Vec<Offer>> {
        self.query_offers(schema::SELECT_ALL_OFFERS, []).await
    }

    async fn get_offers_by_scope(
        &self,
        brand_id: BrandId,
        partnumber: &str,
    ) -> Result<Vec<Offer>> {
        let partnumber = partnumber.to_string();
        self.query_offers(
            schema::SELECT_OFFERS_BY_SCOPE,
            rusqlite::params_from_iter([
                rusqlite::types::Value::Integer(i64::from(brand_id)),
                rusqlite::types::Value::Text(partnumber),
            ]),
        )
        .await
    }

    async fn next_offer_id(&self) -> Result<OfferId> {
        let max: OfferId = self
            .conn
            .call(|conn| {
                conn.query_row(schema::SELECT_MAX_OFFER_ID, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        max.checked_add(1)
            .ok_or_else(|| RepositoryError::InvalidData("offer id space exhausted".to_string()))
    }

    async fn create_offer(&self, offer: &Offer) -> Result<()> {
        let offer_id = offer.offer_id;
        let brand_id = offer.brand_id;
        let start_date = format_timestamp(&offer.start_date);
        let end_date = format_timestamp(&offer.end_date);
        let price_list = offer.price_list;
        let partnumber = offer.partnumber.clone();
        let priority = offer.priority;
        let price = format_price(&offer.price);
        let currency = offer.currency.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_OFFER,
                    rusqlite::params![
                        offer_id, brand_id, start_date, end_date, price_list, partnumber,
                        priority, price, currency
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, offer_id))
    }

    async fn create_offer_with_next_id(&self, mut offer: Offer) -> Result<Offer> {
        let brand_id = offer.brand_id;
        let start_date = format_timestamp(&offer.start_date);
        let end_date = format_timestamp(&offer.end_date);
        let price_list = offer.price_list;
        let partnumber = offer.partnumber.clone();
        let priority = offer.priority;
        let price = format_price(&offer.price);
        let currency = offer.currency.clone();

        offer.offer_id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_OFFER_WITH_NEXT_ID,
                    rusqlite::params![
                        brand_id, start_date, end_date, price_list, partnumber, priority, price,
                        currency
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(offer)
    }

    async fn delete_offer(&self, id: OfferId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_OFFER, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn delete_all_offers(&self) -> Result<u64> {
        let removed = self
            .conn
            .call(|conn| {
                conn.execute(schema::DELETE_ALL_OFFERS, [])
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(removed as u64)
    }
}
