// --- File: crates/mobilify_common/src/transitions_test.rs ---

#[cfg(test)]
mod tests {
    use crate::models::{BookingState, Leg, Place};
    use crate::transitions::{
        allowed_from, close_request_target, is_allowed, is_closing, is_terminal,
        normalize_leg_for_close,
    };
    use chrono::Utc;

    fn open_ended_leg() -> Leg {
        Leg {
            from: Place {
                name: Some("Main station".to_string()),
                lat: 48.7405,
                lon: 9.3108,
                stop_id: None,
            },
            to: None,
            start_time: Utc::now(),
            end_time: None,
            mode: None,
            service_id: Some("svc-bicycle".to_string()),
        }
    }

    #[test]
    fn booked_moves_to_started_or_cancelled_only() {
        let mut allowed = allowed_from(BookingState::Booked);
        allowed.sort_by_key(|s| s.as_str());
        assert_eq!(allowed, vec![BookingState::Cancelled, BookingState::Started]);

        assert!(!is_allowed(BookingState::Booked, BookingState::New));
        assert!(!is_allowed(BookingState::Booked, BookingState::Booked));
        assert!(!is_allowed(BookingState::Booked, BookingState::Finished));
        assert!(!is_allowed(BookingState::Booked, BookingState::Aborted));
    }

    #[test]
    fn started_moves_to_finished_or_aborted_only() {
        let mut allowed = allowed_from(BookingState::Started);
        allowed.sort_by_key(|s| s.as_str());
        assert_eq!(allowed, vec![BookingState::Aborted, BookingState::Finished]);

        assert!(!is_allowed(BookingState::Started, BookingState::Cancelled));
        assert!(!is_allowed(BookingState::Started, BookingState::Started));
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for state in [
            BookingState::Cancelled,
            BookingState::Finished,
            BookingState::Aborted,
        ] {
            assert!(is_terminal(state));
            assert!(allowed_from(state).is_empty(), "{state} must be a dead end");
        }
    }

    #[test]
    fn live_states_are_not_terminal() {
        for state in [
            BookingState::New,
            BookingState::Booked,
            BookingState::Started,
            BookingState::UpdateRequested,
        ] {
            assert!(!is_terminal(state));
        }
    }

    #[test]
    fn close_targets_match_the_live_state() {
        assert_eq!(
            close_request_target(BookingState::Booked),
            Some(BookingState::Cancelled)
        );
        assert_eq!(
            close_request_target(BookingState::Started),
            Some(BookingState::Aborted)
        );
        assert_eq!(close_request_target(BookingState::Finished), None);
        assert_eq!(close_request_target(BookingState::New), None);
    }

    #[test]
    fn closing_states_are_exactly_finished_and_aborted() {
        assert!(is_closing(BookingState::Finished));
        assert!(is_closing(BookingState::Aborted));
        assert!(!is_closing(BookingState::Cancelled));
        assert!(!is_closing(BookingState::Booked));
    }

    #[test]
    fn normalize_fills_missing_drop_off_with_pick_up() {
        let mut leg = open_ended_leg();
        normalize_leg_for_close(&mut leg);
        assert_eq!(leg.to, Some(leg.from.clone()));
    }

    #[test]
    fn normalize_keeps_an_existing_drop_off() {
        let mut leg = open_ended_leg();
        let drop_off = Place::new(48.7833, 9.1833);
        leg.to = Some(drop_off.clone());
        normalize_leg_for_close(&mut leg);
        assert_eq!(leg.to, Some(drop_off));
    }
}
