// --- File: crates/mobilify_adapter/src/handlers.rs ---
use crate::logic::{
    apply_transition, build_options, modes_from_config, AdapterError, ListParams, OptionsParams,
};
use crate::state::SharedAdapterState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use mobilify_common::models::{Booking, BookingState, NewBooking, TripOption};
use tracing::{info, warn};
use uuid::Uuid;

const CREDENTIALS_HEADER_KEY: &str = "x-credentials";

/// When the config carries a credentials value, every request must present
/// it in the `x-credentials` header.
fn check_credentials(
    state: &SharedAdapterState,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, String)> {
    let expected = state
        .config
        .adapter
        .as_ref()
        .and_then(|adapter| adapter.credentials.as_deref());
    let Some(expected) = expected else {
        return Ok(());
    };

    let supplied = headers
        .get(CREDENTIALS_HEADER_KEY)
        .and_then(|value| value.to_str().ok());
    if supplied == Some(expected) {
        Ok(())
    } else {
        warn!("rejecting request without valid {CREDENTIALS_HEADER_KEY} header");
        Err((
            StatusCode::UNAUTHORIZED,
            "Missing or invalid credentials.".to_string(),
        ))
    }
}

/// Handler to list travel offers for a queried trip.
#[axum::debug_handler]
pub async fn get_options_handler(
    State(state): State<SharedAdapterState>,
    headers: HeaderMap,
    Query(params): Query<OptionsParams>,
) -> Result<Json<Vec<TripOption>>, (StatusCode, String)> {
    check_credentials(&state, &headers)?;

    let modes = modes_from_config(
        state
            .config
            .adapter
            .as_ref()
            .and_then(|adapter| adapter.modes.as_deref()),
    );

    match build_options(&params, &modes, Utc::now()) {
        Ok(options) => Ok(Json(options)),
        Err(err) => {
            info!("rejecting options query: {err}");
            Err((StatusCode::BAD_REQUEST, err.to_string()))
        }
    }
}

/// Handler to create a booking from a NEW creation payload.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<SharedAdapterState>,
    headers: HeaderMap,
    Json(payload): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), (StatusCode, String)> {
    check_credentials(&state, &headers)?;

    if payload.state != BookingState::New {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Creation payloads must be NEW, got {}.", payload.state),
        ));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        leg: payload.leg,
        customer: Some(payload.customer),
        state: BookingState::Booked,
    };
    state.store().insert(booking.id.clone(), booking.clone());
    info!("created booking {} in state {}", booking.id, booking.state);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Handler to modify a booking, usually to move it along its lifecycle.
///
/// An illegal transition answers 409 and echoes the stored booking, so the
/// caller can see that the state did not move.
#[axum::debug_handler]
pub async fn modify_booking_handler(
    State(state): State<SharedAdapterState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Booking>,
) -> Response {
    if let Err(err) = check_credentials(&state, &headers) {
        return err.into_response();
    }

    if payload.id != id {
        return (
            StatusCode::BAD_REQUEST,
            "Body id does not match the path id.".to_string(),
        )
            .into_response();
    }

    let mut store = state.store();
    let Some(stored) = store.get(&id).cloned() else {
        return (StatusCode::NOT_FOUND, format!("No booking with id {id}.")).into_response();
    };

    match apply_transition(&stored, &payload) {
        Ok(updated) => {
            info!("booking {} moved from {} to {}", id, stored.state, updated.state);
            store.insert(id, updated.clone());
            Json(updated).into_response()
        }
        Err(err @ AdapterError::IllegalTransition { .. }) => {
            warn!("rejecting modify of booking {id}: {err}");
            (StatusCode::CONFLICT, Json(stored)).into_response()
        }
        Err(err @ AdapterError::MissingDropOff { .. }) => {
            warn!("rejecting modify of booking {id}: {err}");
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

/// Handler to list bookings, optionally filtered by state.
#[axum::debug_handler]
pub async fn get_bookings_handler(
    State(state): State<SharedAdapterState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Booking>>, (StatusCode, String)> {
    check_credentials(&state, &headers)?;

    let store = state.store();
    let mut bookings: Vec<Booking> = store
        .values()
        .filter(|booking| params.state.map_or(true, |s| booking.state == s))
        .cloned()
        .collect();
    // Deterministic listing order regardless of map iteration.
    bookings.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Json(bookings))
}

/// Handler to fetch a single booking by id.
#[axum::debug_handler]
pub async fn get_booking_handler(
    State(state): State<SharedAdapterState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Booking>, (StatusCode, String)> {
    check_credentials(&state, &headers)?;

    let store = state.store();
    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No booking with id {id}.")))
}
