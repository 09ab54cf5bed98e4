//! Action and state tests using TestHarness
//!
//! FRAMEWORK PATTERN: TestHarness
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions
//! - Use fluent assertions for readable tests

use skycast::{
    action::Action,
    components::{Component, ForecastDisplay, ForecastDisplayProps},
    effect::Effect,
    forecast::{CurrentConditions, ForecastBundle},
    reducer::reducer,
    state::{AppState, Location, TempUnit},
};
use tui_dispatch::{
    DataResource, EffectStore, NumericComponentId, assert_emitted, assert_not_emitted, testing::*,
};

fn london() -> Location {
    Location {
        name: "London, United Kingdom".into(),
        lat: 51.5,
        lon: -0.12,
    }
}

fn mock_bundle() -> ForecastBundle {
    ForecastBundle {
        current: CurrentConditions {
            temperature: 22.5,
            wind_speed: 9.3,
            weather_code: 0,
        },
        hourly: Vec::new(),
    }
}

#[test]
fn test_reducer_forecast_fetch() {
    // PATTERN: Create store with reducer, dispatch actions, verify state
    let mut store = EffectStore::new(
        AppState {
            location: Some(london()),
            ..Default::default()
        },
        reducer,
    );

    // Initial state
    assert!(store.state().forecast.is_empty());

    // Dispatch fetch - should set loading and return FetchForecast effect
    let result = store.dispatch(Action::ForecastFetch);
    assert!(result.changed, "State should change");
    assert!(store.state().forecast.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::FetchForecast { .. }));
}

#[test]
fn test_reducer_forecast_load() {
    let mut store = EffectStore::new(
        AppState {
            location: Some(london()),
            ..Default::default()
        },
        reducer,
    );

    store.dispatch(Action::ForecastFetch); // Set loading
    let seq = store.state().fetch_seq;
    store.dispatch(Action::ForecastDidLoad {
        seq,
        bundle: mock_bundle(),
    });

    assert!(store.state().forecast.is_loaded());
    assert_eq!(store.state().forecast.data(), Some(&mock_bundle()));
}

#[test]
fn test_reducer_stale_load_discarded() {
    let mut store = EffectStore::new(
        AppState {
            location: Some(london()),
            ..Default::default()
        },
        reducer,
    );

    store.dispatch(Action::ForecastFetch);
    let stale_seq = store.state().fetch_seq;
    store.dispatch(Action::ForecastFetch); // Supersedes the first attempt

    let result = store.dispatch(Action::ForecastDidLoad {
        seq: stale_seq,
        bundle: mock_bundle(),
    });
    assert!(!result.changed, "Stale completion should be a no-op");
    assert!(store.state().forecast.is_loading());
}

#[test]
fn test_reducer_toggle_units() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().unit, TempUnit::Celsius);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Fahrenheit);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Celsius);
}

#[test]
fn test_component_keyboard_events() {
    // PATTERN: TestHarness for component testing
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ForecastDisplay::new();

    // PATTERN: send_keys helper - parse key strings, call handler
    // NumericComponentId is a simple built-in ComponentId type
    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = ForecastDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // PATTERN: Fluent assertions
    actions.assert_count(1);
    actions.assert_first(Action::ForecastFetch);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ForecastDisplay::new();

    // When not focused, events should be ignored
    let actions = harness.send_keys::<NumericComponentId, _, _>("r q u l", |state, event| {
        let props = ForecastDisplayProps {
            state,
            is_focused: false, // Not focused!
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    // PATTERN: Category is accessible via the ActionCategory trait
    let did_load = Action::ForecastDidLoad {
        seq: 0,
        bundle: ForecastBundle::default(),
    };
    let toggle = Action::UiToggleUnits;
    let tick = Action::Tick;

    // Categories are inferred from naming convention
    assert_eq!(did_load.category(), Some("forecast_did"));
    assert_eq!(toggle.category(), Some("ui"));
    assert_eq!(tick.category(), None); // Uncategorized

    // Generated predicates for categorized actions
    assert!(did_load.is_forecast_did());
    assert!(toggle.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    // PATTERN: Emit actions and drain them
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::ForecastFetch);
    harness.emit(Action::UiToggleUnits);
    harness.emit(Action::ForecastDidError {
        seq: 1,
        message: "oops".into(),
    });

    // Drain all emitted actions
    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::ForecastFetch,
        Action::ForecastDidLoad {
            seq: 0,
            bundle: ForecastBundle::default(),
        },
    ];

    // PATTERN: assert_emitted! macro for pattern matching
    assert_emitted!(actions, Action::ForecastFetch);
    assert_emitted!(actions, Action::ForecastDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::ForecastDidError { .. });
}

#[test]
fn test_selected_entry_tracks_index() {
    let mut bundle = mock_bundle();
    bundle.hourly = (0..3)
        .map(|h| skycast::forecast::HourlyEntry {
            time: chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            temperature: 10.0 + h as f32,
            wind_speed: 5.0,
            weather_code: 0,
        })
        .collect();

    let state = AppState {
        location: Some(london()),
        forecast: DataResource::Loaded(bundle),
        selected_hour: Some(2),
        ..Default::default()
    };

    let entry = state.selected_entry().expect("index is in range");
    assert_eq!(entry.temperature, 12.0);

    // Out-of-range selection yields nothing
    let state = AppState {
        selected_hour: Some(5),
        ..state
    };
    assert!(state.selected_entry().is_none());
}

#[test]
fn test_temp_unit_formatting() {
    // 0°C = 32°F
    assert_eq!(TempUnit::Celsius.format(0.0), "0.0°C");
    assert_eq!(TempUnit::Fahrenheit.format(0.0), "32.0°F");

    // 100°C = 212°F
    assert_eq!(TempUnit::Celsius.format(100.0), "100.0°C");
    assert_eq!(TempUnit::Fahrenheit.format(100.0), "212.0°F");
}
