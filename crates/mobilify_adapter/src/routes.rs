// --- File: crates/mobilify_adapter/src/routes.rs ---

use crate::handlers::{
    create_booking_handler, get_booking_handler, get_bookings_handler, get_options_handler,
    modify_booking_handler,
};
use crate::state::{AdapterState, SharedAdapterState};
use axum::{
    routing::{get, post, put},
    Router,
};
use mobilify_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all booking endpoints, rooted at `/bookings`.
/// Nest it under `/api` to get the documented surface.
pub fn routes(config: Arc<AppConfig>) -> Router {
    router_with_state(Arc::new(AdapterState::new(config)))
}

/// Builds the router over an existing state handle, so callers can keep a
/// way to reach the booking store behind the router.
pub fn router_with_state(state: SharedAdapterState) -> Router {
    Router::new()
        .route("/bookings/options", get(get_options_handler))
        .route(
            "/bookings",
            post(create_booking_handler).get(get_bookings_handler),
        )
        .route(
            "/bookings/{id}",
            put(modify_booking_handler).get(get_booking_handler),
        )
        .with_state(state)
}
