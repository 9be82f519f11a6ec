// --- File: crates/mobilify_testkit/src/scenario.rs ---

//! Generic booking-lifecycle scenarios.
//!
//! Each scenario derives its expectations from the transition table in
//! `mobilify_common::transitions` instead of hard-coding per-state
//! assertions: whatever state the adapter answers with, the set of modify
//! requests that must fail is everything that is not an edge of that state.

use crate::builder::new_booking_from_option;
use crate::cache;
use crate::client::{AdapterClient, OptionsQuery, StatusMatcher};
use crate::error::TestkitError;
use crate::transport::Transport;
use chrono::{DateTime, Duration, Utc};
use mobilify_common::models::{Booking, BookingState, Customer, TripOption};
use mobilify_common::transitions;
use mobilify_config::AppConfig;
use rand::Rng;
use tracing::info;

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<(), TestkitError> {
    if condition {
        Ok(())
    } else {
        Err(TestkitError::Check(message()))
    }
}

/// Everything a scenario run needs to know about the adapter under test:
/// credentials, the customer to book for, and the trip to ask options for.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub options_credentials: Option<String>,
    pub booking_credentials: Option<String>,
    pub customer: Customer,
    pub from: String,
    pub to: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub radius: Option<u32>,
    pub sharing: Option<bool>,
}

impl ScenarioContext {
    /// Builds a context from the unified config. The `trip` section is
    /// required; a kit run without a trip to book makes no sense.
    pub fn from_config(config: &AppConfig, customer: Customer) -> Result<Self, TestkitError> {
        let trip = config.trip.as_ref().ok_or_else(|| {
            TestkitError::Check("the configuration has no [trip] section".to_string())
        })?;
        let auth = config.auth.clone().unwrap_or_default();

        let now = Utc::now();
        let start_time = trip
            .start_offset_minutes
            .map(|minutes| now + Duration::minutes(minutes));
        let end_time = trip
            .window_minutes
            .map(|minutes| start_time.unwrap_or(now) + Duration::minutes(minutes));

        Ok(ScenarioContext {
            options_credentials: auth.options_credentials,
            booking_credentials: auth.booking_credentials,
            customer,
            from: trip.from.clone(),
            to: trip.to.clone(),
            start_time,
            end_time,
            radius: trip.radius,
            sharing: trip.sharing,
        })
    }

    pub fn options_query(&self) -> OptionsQuery {
        OptionsQuery {
            from: self.from.clone(),
            to: self.to.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            radius: self.radius,
            sharing: self.sharing,
        }
    }
}

/// The scenario suite, bound to a client and a context.
pub struct Scenarios<'a, T: Transport> {
    client: &'a AdapterClient<T>,
    ctx: &'a ScenarioContext,
}

impl<'a, T: Transport> Scenarios<'a, T> {
    pub fn new(client: &'a AdapterClient<T>, ctx: &'a ScenarioContext) -> Self {
        Scenarios { client, ctx }
    }

    fn booking_credentials(&self) -> Option<&str> {
        self.ctx.booking_credentials.as_deref()
    }

    /// Fetches options for the context trip, serving repeat calls from the
    /// process-wide cache.
    pub async fn fetch_options(&self) -> Result<Vec<TripOption>, TestkitError> {
        if let Some(cached) = cache::get() {
            return Ok(cached);
        }

        let options = self
            .client
            .get_options(
                &self.ctx.options_query(),
                self.ctx.options_credentials.as_deref(),
                &[StatusMatcher::Is2xx],
            )
            .await?;
        cache::store(&options);
        Ok(options)
    }

    /// A random offer out of the cached options list.
    pub async fn random_cached_option(&self) -> Result<TripOption, TestkitError> {
        let mut options = self.fetch_options().await?;
        check(!options.is_empty(), || {
            "the adapter offered no options for the context trip".to_string()
        })?;
        let index = rand::thread_rng().gen_range(0..options.len());
        Ok(options.swap_remove(index))
    }

    /// Books a random cached offer and checks the creation invariant: a
    /// fresh booking is BOOKED or STARTED, never anything else.
    pub async fn book_random_option(&self) -> Result<Booking, TestkitError> {
        let option = self.random_cached_option().await?;
        let new_booking = new_booking_from_option(&option, &self.ctx.customer, Utc::now());

        let booking = self
            .client
            .create_booking(
                &new_booking,
                self.booking_credentials(),
                &[StatusMatcher::Is2xx],
            )
            .await?;

        check(
            matches!(booking.state, BookingState::Booked | BookingState::Started),
            || {
                format!(
                    "a freshly created booking must be BOOKED or STARTED, got {}",
                    booking.state
                )
            },
        )?;

        info!("booked option as {} in state {}", booking.id, booking.state);
        Ok(booking)
    }

    /// Sends a modify request targeting `state` and expects the adapter to
    /// turn it down with a 4xx. When the rejection body parses as a booking
    /// the state must be unchanged; bodies that are plain error payloads
    /// are tolerated.
    pub async fn try_modify_expect_rejected(
        &self,
        booking: &Booking,
        state: BookingState,
    ) -> Result<(), TestkitError> {
        let mut attempt = booking.clone();
        attempt.state = state;

        let response = self
            .client
            .modify_booking_raw(&attempt, self.booking_credentials(), &[StatusMatcher::Is4xx])
            .await?;

        if let Ok(returned) = serde_json::from_slice::<Booking>(&response.body) {
            check(returned.state == booking.state, || {
                format!(
                    "the state of booking {} moved from {} to {} on a rejected modify to {}",
                    booking.id, booking.state, returned.state, state
                )
            })?;
        }

        Ok(())
    }

    /// Sends a modify request targeting `state` and expects the adapter to
    /// accept it. Closing requests get their leg normalized first, and may
    /// land on either FINISHED or ABORTED depending on how far the trip got.
    pub async fn try_modify_expect_accepted(
        &self,
        booking: &Booking,
        state: BookingState,
    ) -> Result<Booking, TestkitError> {
        let mut attempt = booking.clone();
        attempt.state = state;
        if transitions::is_closing(state) {
            transitions::normalize_leg_for_close(&mut attempt.leg);
        }

        let result = self
            .client
            .modify_booking(&attempt, self.booking_credentials(), &[StatusMatcher::Is2xx])
            .await?;

        if transitions::is_closing(state) {
            check(transitions::is_closing(result.state), || {
                format!(
                    "closing booking {} as {} must end FINISHED or ABORTED, got {}",
                    booking.id, state, result.state
                )
            })?;
        } else {
            check(result.state == state, || {
                format!(
                    "modifying booking {} to {} answered with state {}",
                    booking.id, state, result.state
                )
            })?;
        }

        Ok(result)
    }

    /// Best-effort cleanup: sends whatever request shuts the booking down
    /// and ignores how the adapter answers.
    pub async fn try_close_booking(&self, booking: &Booking) -> Result<(), TestkitError> {
        let Some(target) = transitions::close_request_target(booking.state) else {
            return Ok(());
        };

        let mut attempt = booking.clone();
        attempt.state = target;
        if transitions::is_closing(target) {
            transitions::normalize_leg_for_close(&mut attempt.leg);
        }

        self.client
            .modify_booking_raw(&attempt, self.booking_credentials(), &[])
            .await?;
        Ok(())
    }

    /// Every state must be rejected as a modify target on `booking`. Meant
    /// for bookings in a terminal state, where no edge leads anywhere.
    pub async fn reject_all_states(&self, booking: &Booking) -> Result<(), TestkitError> {
        for state in BookingState::ALL {
            self.try_modify_expect_rejected(booking, state).await?;
        }
        Ok(())
    }

    /// Every modify target that is not an edge from the booking's current
    /// state must be rejected.
    pub async fn reject_non_edges(&self, booking: &Booking) -> Result<(), TestkitError> {
        for state in BookingState::ALL {
            if !transitions::is_allowed(booking.state, state) {
                self.try_modify_expect_rejected(booking, state).await?;
            }
        }
        Ok(())
    }

    /// Books an offer, walks every illegal modify target, closes the
    /// booking on its direct closing edge, and then verifies the closed
    /// booking rejects every state.
    pub async fn book_then_reject_illegal_then_close(&self) -> Result<(), TestkitError> {
        let booking = self.book_random_option().await?;

        self.reject_non_edges(&booking).await?;

        let close_target = match booking.state {
            BookingState::Booked => BookingState::Cancelled,
            BookingState::Started => BookingState::Finished,
            other => {
                return Err(TestkitError::Check(format!(
                    "cannot close a booking created in state {other}"
                )))
            }
        };
        let closed = self.try_modify_expect_accepted(&booking, close_target).await?;

        self.reject_all_states(&closed).await
    }

    /// Books an offer, starts the trip, walks the illegal targets of the
    /// running booking, finishes it, and verifies the finished booking is a
    /// dead end.
    pub async fn book_start_finish_lifecycle(&self) -> Result<(), TestkitError> {
        let booking = self.book_random_option().await?;

        let started = if booking.state == BookingState::Booked {
            let started = self
                .try_modify_expect_accepted(&booking, BookingState::Started)
                .await?;
            // Created-as-STARTED bookings had these rejections covered by
            // the closing scenario already.
            self.reject_non_edges(&started).await?;
            started
        } else {
            booking
        };

        let finished = self
            .try_modify_expect_accepted(&started, BookingState::Finished)
            .await?;
        self.reject_all_states(&finished).await
    }

    /// Books an offer, starts the trip, aborts it, and verifies the aborted
    /// booking is a dead end.
    pub async fn book_start_abort_lifecycle(&self) -> Result<(), TestkitError> {
        let booking = self.book_random_option().await?;

        let started = if booking.state == BookingState::Booked {
            self.try_modify_expect_accepted(&booking, BookingState::Started)
                .await?
        } else {
            booking
        };

        let aborted = self
            .try_modify_expect_accepted(&started, BookingState::Aborted)
            .await?;
        self.reject_all_states(&aborted).await
    }

    /// Listing checks: no stored booking is NEW or UPDATEREQUESTED, a
    /// state-filtered listing equals the matching subset of the full one,
    /// and fetching a booking by id returns its listing entry.
    pub async fn verify_booking_listing(&self) -> Result<(), TestkitError> {
        let bookings = self
            .client
            .get_bookings(None, self.booking_credentials(), &[StatusMatcher::Is2xx])
            .await?;

        for booking in &bookings {
            check(
                !matches!(
                    booking.state,
                    BookingState::New | BookingState::UpdateRequested
                ),
                || {
                    format!(
                        "stored booking {} is in transient state {}",
                        booking.id, booking.state
                    )
                },
            )?;
        }

        if bookings.is_empty() {
            return Ok(());
        }

        // Check the filter for one state that is actually present; one is
        // enough to keep the run short on well-filled stores.
        let present = [
            BookingState::Booked,
            BookingState::Cancelled,
            BookingState::Started,
            BookingState::Finished,
            BookingState::Aborted,
        ]
        .into_iter()
        .find(|state| bookings.iter().any(|b| b.state == *state));
        if let Some(state) = present {
            self.verify_state_filter(&bookings, state).await?;
        }

        let index = rand::thread_rng().gen_range(0..bookings.len());
        let expected = &bookings[index];
        let fetched = self
            .client
            .get_booking_by_id(
                &expected.id,
                self.booking_credentials(),
                &[StatusMatcher::Is2xx],
            )
            .await?;
        check(&fetched == expected, || {
            format!(
                "booking {} fetched by id differs from its listing entry",
                expected.id
            )
        })
    }

    /// The `?state=` listing must equal the state-matching subset of the
    /// full listing.
    pub async fn verify_state_filter(
        &self,
        bookings: &[Booking],
        state: BookingState,
    ) -> Result<(), TestkitError> {
        let filtered = self
            .client
            .get_bookings(
                Some(state),
                self.booking_credentials(),
                &[StatusMatcher::Is2xx],
            )
            .await?;

        let subset: Vec<&Booking> = bookings.iter().filter(|b| b.state == state).collect();
        check(filtered.len() == subset.len(), || {
            format!(
                "the {} filter returned {} bookings, the full listing holds {}",
                state,
                filtered.len(),
                subset.len()
            )
        })?;
        for booking in &filtered {
            check(booking.state == state, || {
                format!(
                    "the {} filter returned booking {} in state {}",
                    state, booking.id, booking.state
                )
            })?;
            check(bookings.contains(booking), || {
                format!(
                    "the {} filter returned booking {} that the full listing lacks",
                    state, booking.id
                )
            })?;
        }
        Ok(())
    }
}
