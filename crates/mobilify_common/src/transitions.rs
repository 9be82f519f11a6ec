// --- File: crates/mobilify_common/src/transitions.rs ---

//! Booking lifecycle state machine.
//!
//! The legal transition set is data rather than scattered assertions: the
//! reference adapter consults it when deciding whether to accept a modify
//! request, and the test kit walks it to derive which requests must be
//! rejected. Keeping both sides on the same table means a new edge only has
//! to be added once.

use crate::models::{BookingState, Leg};

/// Every legal `(from, to)` edge of the booking lifecycle.
///
/// `NEW` only exists in creation payloads; the server moves a booking to
/// `BOOKED` or `STARTED` before it is ever visible. `UPDATEREQUESTED` is a
/// provider-initiated hold that resolves back to `BOOKED` or falls to
/// `CANCELLED`. The three closed states have no outgoing edges.
pub const EDGES: &[(BookingState, BookingState)] = &[
    (BookingState::New, BookingState::Booked),
    (BookingState::New, BookingState::Started),
    (BookingState::Booked, BookingState::Started),
    (BookingState::Booked, BookingState::Cancelled),
    (BookingState::Started, BookingState::Finished),
    (BookingState::Started, BookingState::Aborted),
    (BookingState::UpdateRequested, BookingState::Booked),
    (BookingState::UpdateRequested, BookingState::Cancelled),
];

/// Whether moving a booking from `from` to `to` is legal.
pub fn is_allowed(from: BookingState, to: BookingState) -> bool {
    EDGES.contains(&(from, to))
}

/// All states reachable in one step from `from`.
pub fn allowed_from(from: BookingState) -> Vec<BookingState> {
    EDGES
        .iter()
        .filter(|(f, _)| *f == from)
        .map(|(_, t)| *t)
        .collect()
}

/// Terminal states reject every further modification.
pub fn is_terminal(state: BookingState) -> bool {
    matches!(
        state,
        BookingState::Cancelled | BookingState::Finished | BookingState::Aborted
    )
}

/// Whether `state` is one of the two closing targets of a running trip.
pub fn is_closing(state: BookingState) -> bool {
    matches!(state, BookingState::Finished | BookingState::Aborted)
}

/// The modify target that shuts down a live booking: `BOOKED` bookings are
/// cancelled, `STARTED` ones aborted. `None` for everything else.
pub fn close_request_target(state: BookingState) -> Option<BookingState> {
    match state {
        BookingState::Booked => Some(BookingState::Cancelled),
        BookingState::Started => Some(BookingState::Aborted),
        _ => None,
    }
}

/// A closing request must carry a drop-off place. Offers for free-floating
/// vehicles leave `to` empty, so it defaults to the pick-up place.
pub fn normalize_leg_for_close(leg: &mut Leg) {
    if leg.to.is_none() {
        leg.to = Some(leg.from.clone());
    }
}
