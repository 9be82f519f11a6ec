// --- File: crates/mobilify_common/src/transitions_proptest.rs ---

#[cfg(test)]
mod tests {
    use crate::models::{BookingState, Leg, Place};
    use crate::transitions::{
        allowed_from, is_allowed, is_closing, is_terminal, normalize_leg_for_close, EDGES,
    };
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;
    use proptest::sample::select;

    fn any_state() -> impl Strategy<Value = BookingState> {
        select(BookingState::ALL.to_vec())
    }

    fn any_leg() -> impl Strategy<Value = Leg> {
        (
            -90.0f64..90.0,
            -180.0f64..180.0,
            proptest::option::of((-90.0f64..90.0, -180.0f64..180.0)),
            0i64..10_000_000,
            proptest::option::of(0i64..600),
        )
            .prop_map(|(from_lat, from_lon, to, start_offset_mins, duration_mins)| {
                let start: DateTime<Utc> = DateTime::from_timestamp(0, 0).unwrap()
                    + Duration::minutes(start_offset_mins);
                Leg {
                    from: Place::new(from_lat, from_lon),
                    to: to.map(|(lat, lon)| Place::new(lat, lon)),
                    start_time: start,
                    end_time: duration_mins.map(|mins| start + Duration::minutes(mins)),
                    mode: None,
                    service_id: None,
                }
            })
    }

    proptest! {
        // Legality as queried pointwise must agree with the edge table.
        #[test]
        fn legality_agrees_with_edge_table(from in any_state(), to in any_state()) {
            let listed = EDGES.contains(&(from, to));
            prop_assert_eq!(is_allowed(from, to), listed);
            prop_assert_eq!(allowed_from(from).contains(&to), listed);
        }

        // No edge may ever leave a terminal state.
        #[test]
        fn terminal_states_reject_every_target(from in any_state(), to in any_state()) {
            if is_terminal(from) {
                prop_assert!(!is_allowed(from, to));
            }
        }

        // Every edge into a terminal state ends the lifecycle: whatever the
        // path, two modify steps from a live state never pass through a
        // terminal one.
        #[test]
        fn lifecycle_cannot_continue_past_a_terminal_state(
            a in any_state(), b in any_state(), c in any_state()
        ) {
            if is_allowed(a, b) && is_terminal(b) {
                prop_assert!(!is_allowed(b, c));
            }
        }

        // Closing normalization always yields a populated drop-off and never
        // touches a leg that already has one.
        #[test]
        fn normalized_legs_always_have_a_drop_off(mut leg in any_leg()) {
            let before = leg.to.clone();
            normalize_leg_for_close(&mut leg);
            prop_assert!(leg.to.is_some());
            match before {
                Some(to) => prop_assert_eq!(leg.to, Some(to)),
                None => prop_assert_eq!(leg.to, Some(leg.from.clone())),
            }
        }

        // is_closing marks exactly the terminal states a running trip can
        // reach directly.
        #[test]
        fn closing_states_are_reachable_from_started_only(state in any_state()) {
            if is_closing(state) {
                prop_assert!(is_terminal(state));
                prop_assert!(is_allowed(BookingState::Started, state));
                prop_assert!(!is_allowed(BookingState::Booked, state));
            }
        }
    }
}
