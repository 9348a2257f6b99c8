use axum::{
    extract::{Path, State},
    Json,
};

use pricebook_core::offer::{build_timetable_with_resolution, BrandId, TimetableSlot};

use crate::{handlers::AppError, state::AppState};

/// Flattened price timetable for one product
/// (GET /brand/{brandId}/partnumber/{partnumber}/offer).
///
/// An unknown product yields an empty timetable.
pub async fn get_timetable(
    State(state): State<AppState>,
    Path((brand_id, partnumber)): Path<(BrandId, String)>,
) -> Result<Json<Vec<TimetableSlot>>, AppError> {
    let offers = state
        .offer_repo
        .get_offers_by_scope(brand_id, &partnumber)
        .await?;
    let offer_count = offers.len();

    let slots = build_timetable_with_resolution(offers, state.config.timetable_resolution())?;

    tracing::debug!(
        brand_id,
        partnumber = %partnumber,
        offers = offer_count,
        slots = slots.len(),
        "Built timetable"
    );

    Ok(Json(slots))
}
