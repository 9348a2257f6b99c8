use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{livez, readyz},
        offers::{create_offer, delete_all_offers, delete_offer, get_offer, list_offers},
        timetable::get_timetable,
    },
    state::AppState,
};

/// Prefix for the pricing API routes.
pub const API_PREFIX: &str = "/product-pricing/api/v1";

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/offer",
            get(list_offers)
                .post(create_offer)
                .delete(delete_all_offers),
        )
        .route("/offer/{id}", get(get_offer).delete(delete_offer))
        .route(
            "/brand/{brand_id}/partnumber/{partnumber}/offer",
            get(get_timetable),
        )
        .layer(cors);

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest(API_PREFIX, api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
