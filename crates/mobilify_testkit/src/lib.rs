// --- File: crates/mobilify_testkit/src/lib.rs ---

//! Conformance test kit for mobility-booking adapters.
//!
//! The kit drives an adapter's HTTP surface (trip options, booking
//! creation, modification, listing) and checks the booking lifecycle
//! against the transition table in `mobilify_common::transitions`. It can
//! run against an in-process router or a deployed adapter; the scenario
//! code is the same either way.

// Declare modules within this crate
pub mod builder;
pub mod cache;
pub mod client;
pub mod error;
pub mod scenario;
pub mod transport;

// Re-export the pieces a test binary actually touches
pub use client::{AdapterClient, OptionsQuery, StatusMatcher, CREDENTIALS_HEADER_KEY};
pub use error::TestkitError;
pub use scenario::{ScenarioContext, Scenarios};
pub use transport::{ApiResponse, HttpTransport, RouterTransport, Transport};
