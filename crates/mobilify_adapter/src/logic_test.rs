// --- File: crates/mobilify_adapter/src/logic_test.rs ---

#[cfg(test)]
mod tests {
    use crate::logic::{
        apply_transition, build_options, modes_from_config, AdapterError, OptionsParams,
    };
    use chrono::{Duration, TimeZone, Utc};
    use mobilify_common::models::{Booking, BookingState, Leg, Mode, Place};

    fn query(from: &str) -> OptionsParams {
        OptionsParams {
            from: from.to_string(),
            to: None,
            start_time: None,
            end_time: None,
            radius: Some(500),
            sharing: None,
        }
    }

    fn booked_booking() -> Booking {
        Booking {
            id: "b-1".to_string(),
            leg: Leg {
                from: Place::new(48.7758, 9.1829),
                to: None,
                start_time: Utc::now(),
                end_time: None,
                mode: Some(Mode::Car),
                service_id: Some("svc-car".to_string()),
            },
            customer: None,
            state: BookingState::Booked,
        }
    }

    #[test]
    fn configured_mode_names_resolve_and_typos_drop_out() {
        let names = vec![
            "BICYCLE".to_string(),
            "HOVERCRAFT".to_string(),
            "TAXI".to_string(),
        ];
        assert_eq!(
            modes_from_config(Some(&names)),
            vec![Mode::Bicycle, Mode::Taxi]
        );
    }

    #[test]
    fn missing_mode_config_falls_back_to_defaults() {
        assert_eq!(
            modes_from_config(None),
            vec![Mode::Bicycle, Mode::Car, Mode::Bus]
        );
    }

    #[test]
    fn one_offer_per_mode_with_the_mode_in_the_meta() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let options =
            build_options(&query("48.7758,9.1829"), &[Mode::Bicycle, Mode::Bus], now).unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].meta.mode, Mode::Bicycle);
        assert_eq!(options[1].meta.mode, Mode::Bus);
        for option in &options {
            // The mode is option metadata; the offered leg leaves it open.
            assert!(option.leg.mode.is_none());
            assert_eq!(option.leg.from.lat, 48.7758);
            assert!(option.leg.to.is_none());
        }
        assert_eq!(options[0].leg.service_id.as_deref(), Some("svc-bicycle"));
    }

    #[test]
    fn window_defaults_are_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let options = build_options(&query("48.7758,9.1829"), &[Mode::Car], now).unwrap();

        let leg = &options[0].leg;
        assert_eq!(leg.start_time, now + Duration::minutes(10));
        assert_eq!(leg.end_time, Some(leg.start_time + Duration::minutes(30)));
    }

    #[test]
    fn queried_window_is_taken_over() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut params = query("48.7758,9.1829");
        params.to = Some("48.7833,9.1833".to_string());
        params.start_time = Some(1_750_000_000_000);
        params.end_time = Some(1_750_000_900_000);

        let options = build_options(&params, &[Mode::Car], now).unwrap();
        let leg = &options[0].leg;
        assert_eq!(leg.start_time.timestamp_millis(), 1_750_000_000_000);
        assert_eq!(
            leg.end_time.map(|t| t.timestamp_millis()),
            Some(1_750_000_900_000)
        );
        assert_eq!(leg.to.as_ref().map(|p| p.lat), Some(48.7833));
    }

    #[test]
    fn malformed_coordinates_are_an_invalid_query() {
        let err = build_options(&query("somewhere"), &[Mode::Car], Utc::now()).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidQuery(_)));

        let mut params = query("48.7758,9.1829");
        params.to = Some("elsewhere".to_string());
        let err = build_options(&params, &[Mode::Car], Utc::now()).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidQuery(_)));
    }

    #[test]
    fn a_legal_edge_is_applied_and_keeps_the_stored_id() {
        let stored = booked_booking();
        let mut submitted = stored.clone();
        submitted.id = "spoofed".to_string();
        submitted.state = BookingState::Started;

        let updated = apply_transition(&stored, &submitted).unwrap();
        assert_eq!(updated.state, BookingState::Started);
        assert_eq!(updated.id, "b-1");
    }

    #[test]
    fn an_illegal_edge_is_rejected() {
        let stored = booked_booking();
        let mut submitted = stored.clone();
        submitted.state = BookingState::Finished;

        let err = apply_transition(&stored, &submitted).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::IllegalTransition {
                from: BookingState::Booked,
                to: BookingState::Finished,
            }
        ));
    }

    #[test]
    fn closing_without_a_drop_off_is_rejected() {
        let mut stored = booked_booking();
        stored.state = BookingState::Started;

        let mut submitted = stored.clone();
        submitted.state = BookingState::Finished;
        let err = apply_transition(&stored, &submitted).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::MissingDropOff {
                target: BookingState::Finished,
            }
        ));

        submitted.leg.to = Some(submitted.leg.from.clone());
        let updated = apply_transition(&stored, &submitted).unwrap();
        assert_eq!(updated.state, BookingState::Finished);
    }
}
