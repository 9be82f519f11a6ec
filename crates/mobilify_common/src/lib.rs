// --- File: crates/mobilify_common/src/lib.rs ---

// Declare modules within this crate
pub mod http; // Shared HTTP client
pub mod logging; // Logging utilities
pub mod models; // Booking API wire model
pub mod transitions; // Booking lifecycle state machine
#[cfg(test)]
mod transitions_proptest;
#[cfg(test)]
mod transitions_test;

// Re-export the model types used across the workspace
pub use models::{Booking, BookingState, Customer, Leg, Mode, NewBooking, OptionMeta, Place, TripOption};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};
