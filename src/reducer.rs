//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! The whole attempt lifecycle lives here: Idle → Busy → Loaded/Failed,
//! collapsing back to a cleared Busy at the start of every new attempt.

use tui_dispatch::{DataResource, DispatchResult};

use crate::api::{parse_coordinates, ApiError};
use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LOADING_ANIM_CYCLE_TICKS};

/// Start a new lookup attempt: bump the sequence, clear prior data, error
/// and hour selection, enter Busy. Returns the new attempt sequence.
fn begin_attempt(state: &mut AppState) -> u64 {
    state.fetch_seq = state.fetch_seq.wrapping_add(1);
    state.forecast = DataResource::Loading;
    state.selected_hour = None;
    state.tick_count = 0;
    state.loading_anim_ticks_remaining = 0;
    state.fetch_seq
}

fn finish_attempt_anim(state: &mut AppState) {
    state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Forecast attempts =====
        Action::ForecastFetch => {
            let Some(location) = state.location.clone() else {
                // Nothing resolved yet; the overlay is the way in
                return DispatchResult::unchanged();
            };
            let seq = begin_attempt(state);
            DispatchResult::changed_with(Effect::FetchForecast { seq, location })
        }

        Action::ForecastDidLoad { seq, bundle } => {
            if seq != state.fetch_seq {
                // Completion of a superseded attempt; discard
                return DispatchResult::unchanged();
            }
            state.forecast = DataResource::Loaded(bundle);
            finish_attempt_anim(state);
            DispatchResult::changed()
        }

        Action::ForecastDidError { seq, message } => {
            if seq != state.fetch_seq {
                return DispatchResult::unchanged();
            }
            state.forecast = DataResource::Failed(message);
            finish_attempt_anim(state);
            DispatchResult::changed()
        }

        Action::LocationDidResolve { seq, location } => {
            if seq != state.fetch_seq {
                return DispatchResult::unchanged();
            }
            state.location = Some(location.clone());
            DispatchResult::changed_with(Effect::FetchForecast { seq, location })
        }

        Action::LocateRequest => {
            let seq = begin_attempt(state);
            DispatchResult::changed_with(Effect::Locate { seq })
        }

        // ===== Search overlay =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(input) => {
            state.search_mode = false;
            state.search_query.clear();

            let input = input.trim().to_string();
            if input.is_empty() {
                // Busy transitions straight to Failure, no network call
                begin_attempt(state);
                state.forecast = DataResource::Failed(ApiError::MissingInput.to_string());
                finish_attempt_anim(state);
                return DispatchResult::changed();
            }

            // Explicit coordinates take precedence over geocoding
            if let Some(location) = parse_coordinates(&input) {
                let seq = begin_attempt(state);
                state.location = Some(location.clone());
                return DispatchResult::changed_with(Effect::FetchForecast { seq, location });
            }

            let seq = begin_attempt(state);
            DispatchResult::changed_with(Effect::Geocode { seq, city: input })
        }

        // ===== Hour picker =====
        Action::HourSelect(index) => {
            let in_range = state
                .forecast
                .data()
                .is_some_and(|bundle| index < bundle.hourly.len());
            if in_range && state.selected_hour != Some(index) {
                state.selected_hour = Some(index);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            let animating = state.loading_anim_active();
            if animating {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{CurrentConditions, ForecastBundle, HourlyEntry};
    use crate::state::Location;
    use chrono::NaiveDate;

    fn london() -> Location {
        Location {
            name: "London, United Kingdom".into(),
            lat: 51.5,
            lon: -0.12,
        }
    }

    fn bundle(hours: u32) -> ForecastBundle {
        ForecastBundle {
            current: CurrentConditions {
                temperature: 20.0,
                wind_speed: 10.0,
                weather_code: 3,
            },
            hourly: (0..hours)
                .map(|h| HourlyEntry {
                    time: NaiveDate::from_ymd_opt(2024, 6, 1)
                        .unwrap()
                        .and_hms_opt(h % 24, 0, 0)
                        .unwrap(),
                    temperature: 15.0,
                    wind_speed: 8.0,
                    weather_code: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_fetch_without_location_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::ForecastFetch);
        assert!(!result.changed);
        assert!(state.forecast.is_empty());
    }

    #[test]
    fn test_fetch_enters_busy_and_clears_prior_state() {
        let mut state = AppState {
            location: Some(london()),
            forecast: DataResource::Loaded(bundle(6)),
            selected_hour: Some(2),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::ForecastFetch);

        assert!(result.changed);
        assert!(state.forecast.is_loading());
        assert!(state.selected_hour.is_none());
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(result.effects[0], Effect::FetchForecast { .. }));
    }

    #[test]
    fn test_submit_coordinates_skips_geocoding() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::SearchSubmit("51.5, -0.12".into()));

        assert!(state.forecast.is_loading());
        let loc = state.location.as_ref().unwrap();
        assert_eq!(loc.lat, 51.5);
        assert_eq!(loc.lon, -0.12);
        assert!(matches!(
            result.effects[0],
            Effect::FetchForecast { .. }
        ));
    }

    #[test]
    fn test_submit_city_geocodes() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::SearchSubmit("London".into()));

        assert!(state.forecast.is_loading());
        assert!(state.location.is_none());
        assert!(
            matches!(&result.effects[0], Effect::Geocode { city, .. } if city == "London")
        );
    }

    #[test]
    fn test_submit_empty_fails_without_network() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::SearchSubmit("   ".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(state.forecast.is_failed());
        assert_eq!(state.forecast.error(), Some("Enter a city or coordinates"));
    }

    #[test]
    fn test_load_and_error_are_terminal() {
        let mut state = AppState {
            location: Some(london()),
            ..Default::default()
        };

        reducer(&mut state, Action::ForecastFetch);
        let seq = state.fetch_seq;
        reducer(
            &mut state,
            Action::ForecastDidLoad {
                seq,
                bundle: bundle(12),
            },
        );
        assert!(state.forecast.is_loaded());

        reducer(&mut state, Action::ForecastFetch);
        let seq = state.fetch_seq;
        reducer(
            &mut state,
            Action::ForecastDidError {
                seq,
                message: "Request timed out".into(),
            },
        );
        assert!(state.forecast.is_failed());
        assert_eq!(state.forecast.error(), Some("Request timed out"));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut state = AppState {
            location: Some(london()),
            ..Default::default()
        };

        reducer(&mut state, Action::ForecastFetch);
        let old_seq = state.fetch_seq;
        // A second attempt supersedes the first
        reducer(&mut state, Action::ForecastFetch);

        let result = reducer(
            &mut state,
            Action::ForecastDidLoad {
                seq: old_seq,
                bundle: bundle(12),
            },
        );
        assert!(!result.changed);
        assert!(state.forecast.is_loading());

        let result = reducer(
            &mut state,
            Action::ForecastDidError {
                seq: old_seq,
                message: "late failure".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.forecast.is_loading());
    }

    #[test]
    fn test_resolve_sets_location_and_fetches() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("London".into()));
        let seq = state.fetch_seq;

        let result = reducer(
            &mut state,
            Action::LocationDidResolve {
                seq,
                location: london(),
            },
        );
        assert_eq!(state.location.as_ref().unwrap().lat, 51.5);
        assert!(state.forecast.is_loading());
        assert!(matches!(
            result.effects[0],
            Effect::FetchForecast { .. }
        ));
    }

    #[test]
    fn test_hour_select_bounds() {
        let mut state = AppState {
            location: Some(london()),
            forecast: DataResource::Loaded(bundle(12)),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::HourSelect(3));
        assert!(result.changed);
        assert_eq!(state.selected_hour, Some(3));

        // Out of range: no renderable effect
        let result = reducer(&mut state, Action::HourSelect(12));
        assert!(!result.changed);
        assert_eq!(state.selected_hour, Some(3));
    }

    #[test]
    fn test_hour_select_before_success_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::HourSelect(0));
        assert!(!result.changed);
        assert!(state.selected_hour.is_none());
    }

    #[test]
    fn test_locate_request_enters_busy() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LocateRequest);
        assert!(state.forecast.is_loading());
        assert!(matches!(result.effects[0], Effect::Locate { .. }));
    }

    #[test]
    fn test_tick_rerenders_during_loading_animation() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);

        state.loading_anim_ticks_remaining = 1;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.loading_anim_ticks_remaining, 0);

        state.forecast = DataResource::Loading;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
    }
}
