// --- File: crates/mobilify_testkit/src/client.rs ---

//! Request building and response checking against the booking API.

use crate::error::TestkitError;
use crate::transport::{ApiResponse, Transport};
use chrono::{DateTime, Utc};
use http::{header, Method, Request, StatusCode};
use mobilify_common::models::{Booking, BookingState, NewBooking, TripOption};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Header carrying provider credentials, attached whenever a scenario
/// context supplies them.
pub const CREDENTIALS_HEADER_KEY: &str = "x-credentials";

// --- Status Matchers ---

/// Expected-status checks applied to a response before it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMatcher {
    /// Any 2xx status
    Is2xx,
    /// Any 4xx status
    Is4xx,
    /// Exactly this status
    Status(StatusCode),
}

impl StatusMatcher {
    pub fn matches(&self, status: StatusCode) -> bool {
        match self {
            StatusMatcher::Is2xx => status.is_success(),
            StatusMatcher::Is4xx => status.is_client_error(),
            StatusMatcher::Status(expected) => status == *expected,
        }
    }
}

impl fmt::Display for StatusMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMatcher::Is2xx => f.write_str("2xx"),
            StatusMatcher::Is4xx => f.write_str("4xx"),
            StatusMatcher::Status(status) => write!(f, "{status}"),
        }
    }
}

// --- Options Query ---

/// Query of the options endpoint. Coordinates use the `"lat,lon"` form;
/// timestamps go over the wire as epoch milliseconds.
#[derive(Debug, Clone)]
pub struct OptionsQuery {
    pub from: String,
    pub to: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub radius: Option<u32>,
    pub sharing: Option<bool>,
}

impl OptionsQuery {
    pub fn new(from: impl Into<String>) -> Self {
        OptionsQuery {
            from: from.into(),
            to: None,
            start_time: None,
            end_time: None,
            radius: None,
            sharing: None,
        }
    }

    fn to_query_string(&self) -> Result<String, TestkitError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            from: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            to: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            start_time: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            end_time: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            radius: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sharing: Option<bool>,
        }

        serde_urlencoded::to_string(Wire {
            from: &self.from,
            to: self.to.as_deref(),
            start_time: self.start_time.map(|t| t.timestamp_millis()),
            end_time: self.end_time.map(|t| t.timestamp_millis()),
            radius: self.radius,
            sharing: self.sharing,
        })
        .map_err(|err| TestkitError::Transport(format!("failed to encode options query: {err}")))
    }
}

// --- Client ---

/// Thin request/response client over a [`Transport`].
///
/// Every operation takes the credentials to attach (if any) and the status
/// matchers the response has to satisfy. A response failing a matcher is
/// logged and returned as [`TestkitError::UnexpectedStatus`].
pub struct AdapterClient<T: Transport> {
    transport: T,
}

impl<T: Transport> AdapterClient<T> {
    pub fn new(transport: T) -> Self {
        AdapterClient { transport }
    }

    async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        credentials: Option<&str>,
        body: Option<String>,
        matchers: &[StatusMatcher],
    ) -> Result<ApiResponse, TestkitError> {
        let mut builder = Request::builder().method(method).uri(path_and_query);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(credentials) = credentials {
            builder = builder.header(CREDENTIALS_HEADER_KEY, credentials);
        }
        let request = builder
            .body(body.unwrap_or_default())
            .map_err(|err| TestkitError::Transport(err.to_string()))?;

        let response = self.transport.send(request).await?;

        for matcher in matchers {
            if !matcher.matches(response.status) {
                let body = String::from_utf8_lossy(&response.body).into_owned();
                error!(
                    "expected a {matcher} response, got {}: {body}",
                    response.status
                );
                return Err(TestkitError::UnexpectedStatus {
                    status: response.status,
                    body,
                });
            }
        }

        Ok(response)
    }

    /// GET `/api/bookings/options`
    pub async fn get_options(
        &self,
        query: &OptionsQuery,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<Vec<TripOption>, TestkitError> {
        let path = format!("/api/bookings/options?{}", query.to_query_string()?);
        self.request(Method::GET, &path, credentials, None, matchers)
            .await?
            .json()
    }

    /// POST `/api/bookings`
    pub async fn create_booking(
        &self,
        new_booking: &NewBooking,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<Booking, TestkitError> {
        let body = serde_json::to_string(new_booking)?;
        self.request(Method::POST, "/api/bookings", credentials, Some(body), matchers)
            .await?
            .json()
    }

    /// PUT `/api/bookings/{id}`, returning the raw response. The rejection
    /// scenarios need the response even when its body is not a booking.
    pub async fn modify_booking_raw(
        &self,
        booking: &Booking,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<ApiResponse, TestkitError> {
        let body = serde_json::to_string(booking)?;
        let path = format!("/api/bookings/{}", booking.id);
        self.request(Method::PUT, &path, credentials, Some(body), matchers)
            .await
    }

    /// PUT `/api/bookings/{id}`
    pub async fn modify_booking(
        &self,
        booking: &Booking,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<Booking, TestkitError> {
        self.modify_booking_raw(booking, credentials, matchers)
            .await?
            .json()
    }

    /// GET `/api/bookings`, optionally filtered with `?state=`
    pub async fn get_bookings(
        &self,
        by_state: Option<BookingState>,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<Vec<Booking>, TestkitError> {
        let path = match by_state {
            Some(state) => format!("/api/bookings?state={state}"),
            None => "/api/bookings".to_string(),
        };
        self.request(Method::GET, &path, credentials, None, matchers)
            .await?
            .json()
    }

    /// GET `/api/bookings/{id}`
    pub async fn get_booking_by_id(
        &self,
        booking_id: &str,
        credentials: Option<&str>,
        matchers: &[StatusMatcher],
    ) -> Result<Booking, TestkitError> {
        let path = format!("/api/bookings/{booking_id}");
        self.request(Method::GET, &path, credentials, None, matchers)
            .await?
            .json()
    }
}
