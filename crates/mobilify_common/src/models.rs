// --- File: crates/mobilify_common/src/models.rs ---

// Wire model of the mobility-booking API. Field names follow the adapter
// protocol (camelCase keys, UPPERCASE enum values, timestamps as epoch
// milliseconds), so every struct here round-trips through serde_json
// unchanged against a conforming adapter.

use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named coordinate, used for the endpoints of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Stable stop identifier, when the place is a station or hub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
}

impl Place {
    pub fn new(lat: f64, lon: f64) -> Self {
        Place {
            name: None,
            lat,
            lon,
            stop_id: None,
        }
    }

    /// Parses the `"lat,lon"` form used in query strings.
    pub fn parse_lat_lon(value: &str) -> Option<Self> {
        let (lat, lon) = value.split_once(',')?;
        Some(Place::new(
            lat.trim().parse().ok()?,
            lon.trim().parse().ok()?,
        ))
    }

    /// Renders the place back into the `"lat,lon"` query form.
    pub fn to_lat_lon(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Transport mode of a leg or option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Walk,
    Bicycle,
    Scooter,
    Car,
    Taxi,
    Bus,
    Train,
    Ferry,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Walk => "WALK",
            Mode::Bicycle => "BICYCLE",
            Mode::Scooter => "SCOOTER",
            Mode::Car => "CAR",
            Mode::Taxi => "TAXI",
            Mode::Bus => "BUS",
            Mode::Train => "TRAIN",
            Mode::Ferry => "FERRY",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trip segment.
///
/// `to` stays empty for open-ended offers (free-floating vehicles); the
/// lifecycle rules in [`crate::transitions`] require it to be filled in
/// before a booking can be closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub from: Place,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Place>,
    #[serde(with = "ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Provider-side identifier of the service this leg belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

/// The customer a booking is made for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Mode metadata attached to a travel offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMeta {
    pub mode: Mode,
}

/// A travel offer returned by the options endpoint.
///
/// Read-only from the client's perspective; booking one goes through
/// [`NewBooking`]. (`Option` is taken in Rust, hence the name.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOption {
    pub leg: Leg,
    pub meta: OptionMeta,
}

/// Booking creation payload, derived from a [`TripOption`] and a [`Customer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub state: BookingState,
    pub leg: Leg,
    pub customer: Customer,
}

impl NewBooking {
    /// Creation requests always start out in [`BookingState::New`].
    pub fn new(leg: Leg, customer: Customer) -> Self {
        NewBooking {
            state: BookingState::New,
            leg,
            customer,
        }
    }
}

/// A server-assigned booking tracked through its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub leg: Leg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub state: BookingState,
}

/// Lifecycle state of a booking.
///
/// The legal movements between these states live in [`crate::transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingState {
    New,
    Booked,
    Started,
    Cancelled,
    Finished,
    Aborted,
    UpdateRequested,
}

impl BookingState {
    /// Every state, in protocol declaration order. Handy for exhaustive
    /// "try every target" loops.
    pub const ALL: [BookingState; 7] = [
        BookingState::New,
        BookingState::Booked,
        BookingState::Started,
        BookingState::Cancelled,
        BookingState::Finished,
        BookingState::Aborted,
        BookingState::UpdateRequested,
    ];

    /// Wire spelling, as used in JSON bodies and the `state` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::New => "NEW",
            BookingState::Booked => "BOOKED",
            BookingState::Started => "STARTED",
            BookingState::Cancelled => "CANCELLED",
            BookingState::Finished => "FINISHED",
            BookingState::Aborted => "ABORTED",
            BookingState::UpdateRequested => "UPDATEREQUESTED",
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
