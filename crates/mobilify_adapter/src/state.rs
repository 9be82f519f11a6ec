// --- File: crates/mobilify_adapter/src/state.rs ---
use mobilify_common::models::Booking;
use mobilify_config::AppConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// Define shared state needed by the adapter handlers
pub struct AdapterState {
    pub config: Arc<AppConfig>,
    /// Process-local booking store; cleared with the process.
    pub bookings: Mutex<HashMap<String, Booking>>,
}

impl AdapterState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        AdapterState {
            config,
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// Locks the booking store, recovering it if a test thread panicked
    /// while holding the lock.
    pub fn store(&self) -> MutexGuard<'_, HashMap<String, Booking>> {
        self.bookings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub type SharedAdapterState = Arc<AdapterState>;
