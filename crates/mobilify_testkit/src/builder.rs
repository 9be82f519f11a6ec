// --- File: crates/mobilify_testkit/src/builder.rs ---

use chrono::{DateTime, Duration, Utc};
use mobilify_common::models::{Customer, Leg, NewBooking, TripOption};

/// Derives a creation payload from a travel offer.
///
/// Offers age between fetching and booking, so an offered start that has
/// already passed moves to shortly after `now`. An end that would then lie
/// before the start keeps its distance to the offered start instead, the
/// proposed leg stays as long as the offered one.
pub fn new_booking_from_option(
    option: &TripOption,
    customer: &Customer,
    now: DateTime<Utc>,
) -> NewBooking {
    let offered_start = option.leg.start_time;
    let start = if offered_start > now {
        offered_start
    } else {
        now + Duration::seconds(5)
    };

    let end = option.leg.end_time.map(|end| {
        if end < start {
            start + (end - offered_start)
        } else {
            end
        }
    });

    NewBooking::new(
        Leg {
            from: option.leg.from.clone(),
            to: option.leg.to.clone(),
            start_time: start,
            end_time: end,
            mode: Some(option.meta.mode),
            service_id: option.leg.service_id.clone(),
        },
        customer.clone(),
    )
}
