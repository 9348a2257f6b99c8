//! Offer CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use pricebook_core::offer::{validate_offer, CreateOfferRequest, Offer, OfferId};
use pricebook_core::storage::RepositoryError;

use crate::{handlers::AppError, models::DeletedOffers, state::AppState};

/// Create a new offer (POST /offer).
///
/// When the body carries no `offerId` the repository allocates the next
/// free one as part of the insert.
pub async fn create_offer(
    State(state): State<AppState>,
    payload: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    tracing::debug!(payload = ?payload, "Received create offer request");

    let requested_id = payload.offer_id;
    let offer = payload.into_offer(requested_id.unwrap_or_default());
    validate_offer(&offer)?;

    let offer = match requested_id {
        Some(_) => {
            state.offer_repo.create_offer(&offer).await?;
            offer
        }
        None => state.offer_repo.create_offer_with_next_id(offer).await?,
    };

    tracing::info!(
        offer_id = offer.offer_id,
        brand_id = offer.brand_id,
        partnumber = %offer.partnumber,
        "Created new offer"
    );

    Ok((StatusCode::CREATED, Json(offer)))
}

/// List every offer (GET /offer).
pub async fn list_offers(State(state): State<AppState>) -> Result<Json<Vec<Offer>>, AppError> {
    let offers = state.offer_repo.list_offers().await?;
    Ok(Json(offers))
}

/// Get a single offer by ID (GET /offer/{id}).
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<OfferId>,
) -> Result<Json<Offer>, AppError> {
    match state.offer_repo.get_offer(id).await? {
        Some(offer) => Ok(Json(offer)),
        None => Err(RepositoryError::offer_not_found(id).into()),
    }
}

/// Delete an offer by ID (DELETE /offer/{id}).
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<OfferId>,
) -> Result<StatusCode, AppError> {
    state.offer_repo.delete_offer(id).await?;

    tracing::info!(offer_id = id, "Deleted offer");

    Ok(StatusCode::OK)
}

/// Delete every offer (DELETE /offer).
pub async fn delete_all_offers(
    State(state): State<AppState>,
) -> Result<Json<DeletedOffers>, AppError> {
    let deleted = state.offer_repo.delete_all_offers().await?;

    tracing::info!(deleted, "Deleted all offers");

    Ok(Json(DeletedOffers { deleted }))
}
