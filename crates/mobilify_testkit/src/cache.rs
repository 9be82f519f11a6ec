// --- File: crates/mobilify_testkit/src/cache.rs ---

//! Process-lifetime cache of the last fetched options list.
//!
//! Scenario runs share one options fetch instead of asking the adapter once
//! per test; [`clear`] forces the next fetch to go out again.

use mobilify_common::models::TripOption;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

static CACHED_OPTIONS: Lazy<Mutex<Option<Vec<TripOption>>>> = Lazy::new(|| Mutex::new(None));

fn slot() -> MutexGuard<'static, Option<Vec<TripOption>>> {
    CACHED_OPTIONS.lock().unwrap_or_else(|e| e.into_inner())
}

/// The cached list, if a fetch succeeded since the last [`clear`].
pub fn get() -> Option<Vec<TripOption>> {
    slot().clone()
}

/// Replaces the cached list.
pub fn store(options: &[TripOption]) {
    *slot() = Some(options.to_vec());
}

/// Empties the cache; the next scenario fetch hits the adapter again.
pub fn clear() {
    *slot() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mobilify_common::models::{Leg, Mode, OptionMeta, Place};

    fn sample_option() -> TripOption {
        TripOption {
            leg: Leg {
                from: Place::new(48.7758, 9.1829),
                to: None,
                start_time: Utc::now(),
                end_time: None,
                mode: None,
                service_id: Some("svc-bus".to_string()),
            },
            meta: OptionMeta { mode: Mode::Bus },
        }
    }

    #[test]
    fn store_get_clear_round_trip() {
        clear();
        assert!(get().is_none());

        let options = vec![sample_option(), sample_option()];
        store(&options);
        assert_eq!(get().as_deref(), Some(options.as_slice()));

        clear();
        assert!(get().is_none());
    }
}
