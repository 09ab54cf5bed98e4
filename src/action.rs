//! Actions - user events and async completions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::forecast::ForecastBundle;
use crate::state::Location;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Forecast category =====
    /// Intent: refetch the forecast for the currently resolved location
    ForecastFetch,

    /// Result: current conditions and windowed hourly series loaded.
    /// `seq` identifies the attempt that produced the data.
    ForecastDidLoad { seq: u64, bundle: ForecastBundle },

    /// Result: the attempt failed anywhere in the resolve/fetch chain
    ForecastDidError { seq: u64, message: String },

    // ===== Location category =====
    /// Result: a city name, coordinate pair or IP lookup resolved to
    /// coordinates; the forecast fetch follows
    LocationDidResolve { seq: u64, location: Location },

    // ===== Locate category =====
    /// Intent: approximate the device location and fetch for it
    LocateRequest,

    // ===== Search category =====
    /// Open the lookup overlay
    SearchOpen,

    /// Close the lookup overlay (cancel)
    SearchClose,

    /// Input text changed
    SearchQueryChange(String),

    /// Submit the input: either a city name or a "lat,lon" pair
    SearchSubmit(String),

    // ===== Hour picker =====
    /// Select an hour in the rendered 12-hour list (by index).
    /// Pure presentation: no network activity.
    HourSelect(usize),

    // ===== UI category =====
    /// Toggle between Celsius and Fahrenheit
    UiToggleUnits,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
