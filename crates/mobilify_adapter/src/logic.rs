// --- File: crates/mobilify_adapter/src/logic.rs ---
use chrono::{DateTime, Duration, Utc};
use mobilify_common::models::{Booking, BookingState, Leg, Mode, OptionMeta, Place, TripOption};
use mobilify_common::transitions;
use serde::Deserialize;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition {
        from: BookingState,
        to: BookingState,
    },
    #[error("a booking closed as {target} needs a drop-off place")]
    MissingDropOff { target: BookingState },
}

// --- Data Structures ---

/// Query parameters of the options endpoint.
/// Timestamps arrive as epoch milliseconds.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OptionsParams {
    /// Pick-up coordinate in "lat,lon" form
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub sharing: Option<bool>,
}

/// Query parameters of the booking listing endpoint.
#[derive(Deserialize, Debug)]
pub struct ListParams {
    #[serde(default)]
    pub state: Option<BookingState>,
}

/// Offered when the config does not name any modes.
const DEFAULT_MODES: [Mode; 3] = [Mode::Bicycle, Mode::Car, Mode::Bus];

/// Resolves the configured mode names; unknown names are skipped so a typo
/// in the config narrows the offer instead of taking the adapter down.
pub fn modes_from_config(names: Option<&[String]>) -> Vec<Mode> {
    match names {
        Some(names) => names
            .iter()
            .filter_map(|name| match name.as_str() {
                "WALK" => Some(Mode::Walk),
                "BICYCLE" => Some(Mode::Bicycle),
                "SCOOTER" => Some(Mode::Scooter),
                "CAR" => Some(Mode::Car),
                "TAXI" => Some(Mode::Taxi),
                "BUS" => Some(Mode::Bus),
                "TRAIN" => Some(Mode::Train),
                "FERRY" => Some(Mode::Ferry),
                _ => None,
            })
            .collect(),
        None => DEFAULT_MODES.to_vec(),
    }
}

// --- Option Synthesis ---

/// Synthesizes one travel offer per mode for the queried trip.
///
/// The offer's leg copies the queried endpoints and window; the mode lives
/// in the option metadata, not on the leg. Without a queried start the
/// offer starts shortly after `now`, without an end it runs for half an
/// hour past the start.
pub fn build_options(
    params: &OptionsParams,
    modes: &[Mode],
    now: DateTime<Utc>,
) -> Result<Vec<TripOption>, AdapterError> {
    let from = Place::parse_lat_lon(&params.from).ok_or_else(|| {
        AdapterError::InvalidQuery(format!("from must be \"lat,lon\", got {:?}", params.from))
    })?;

    let to = match params.to.as_deref() {
        Some(raw) => Some(Place::parse_lat_lon(raw).ok_or_else(|| {
            AdapterError::InvalidQuery(format!("to must be \"lat,lon\", got {raw:?}"))
        })?),
        None => None,
    };

    let start = params
        .start_time
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(|| now + Duration::minutes(10));
    let end = params
        .end_time
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(|| start + Duration::minutes(30));

    Ok(modes
        .iter()
        .map(|&mode| TripOption {
            leg: Leg {
                from: from.clone(),
                to: to.clone(),
                start_time: start,
                end_time: Some(end),
                mode: None,
                service_id: Some(format!("svc-{}", mode.as_str().to_lowercase())),
            },
            meta: OptionMeta { mode },
        })
        .collect())
}

// --- Booking Mutation ---

/// Applies a modify request against the stored booking.
///
/// The submitted state must be a legal edge from the stored one, and a
/// closing request must carry a drop-off place. The stored id always wins
/// over whatever the payload claims.
pub fn apply_transition(stored: &Booking, submitted: &Booking) -> Result<Booking, AdapterError> {
    if !transitions::is_allowed(stored.state, submitted.state) {
        return Err(AdapterError::IllegalTransition {
            from: stored.state,
            to: submitted.state,
        });
    }

    if transitions::is_closing(submitted.state) && submitted.leg.to.is_none() {
        return Err(AdapterError::MissingDropOff {
            target: submitted.state,
        });
    }

    let mut updated = submitted.clone();
    updated.id = stored.id.clone();
    Ok(updated)
}
