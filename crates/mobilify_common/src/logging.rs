// --- File: crates/mobilify_common/src/logging.rs ---

//! Logging setup shared by the adapter binary and the test kit.
//!
//! Call [`init`] once at startup. `RUST_LOG` overrides the default filter,
//! so a single env var turns request tracing on for a failing run.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at the default INFO level.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum level for the
/// `mobilify` crates.
///
/// Safe to call more than once; later calls are no-ops, which keeps test
/// binaries that race on setup from panicking.
pub fn init_with_level(level: Level) {
    let filter =
        EnvFilter::from_default_env().add_directive(format!("mobilify={level}").parse().unwrap());

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_file(true).with_line_number(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
