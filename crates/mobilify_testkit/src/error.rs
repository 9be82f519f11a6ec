// --- File: crates/mobilify_testkit/src/error.rs ---
use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the test kit.
///
/// `Check` is the kit's assertion failure: the adapter answered, but not
/// the way a conforming implementation would have.
#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("check failed: {0}")]
    Check(String),
}

impl From<reqwest::Error> for TestkitError {
    fn from(err: reqwest::Error) -> Self {
        TestkitError::Transport(err.to_string())
    }
}
