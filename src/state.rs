//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::forecast::{ForecastBundle, HourlyEntry};

/// A geographic location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn format(&self, celsius: f32) -> String {
        match self {
            TempUnit::Celsius => format!("{:.1}°C", celsius),
            TempUnit::Fahrenheit => format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0),
        }
    }
}

/// Animation timing for the header gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Location the on-screen data belongs to; `None` until first resolve
    #[debug(section = "Location", label = "Resolved", debug_fmt)]
    pub location: Option<Location>,

    /// Forecast lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Forecast", label = "Data", debug_fmt)]
    pub forecast: DataResource<ForecastBundle>,

    /// Hour-picker selection; only meaningful while it indexes into the
    /// currently loaded hourly series
    #[debug(section = "Forecast", label = "Selected hour", debug_fmt)]
    pub selected_hour: Option<usize>,

    /// Temperature unit preference
    #[debug(section = "Forecast", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    /// Monotonic attempt counter. Completion actions carry the value of the
    /// attempt that produced them; older values are stale and discarded.
    #[debug(section = "Forecast", label = "Attempt", debug_fmt)]
    pub fetch_seq: u64,

    // --- Animation internals (skipped) ---
    /// Animation frame counter (for gradient seam)
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,

    // --- Search overlay (skipped) ---
    /// Whether the lookup overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Current input: a city name or a "lat,lon" pair
    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hourly entry the picker currently points at, if the selection
    /// is valid for the loaded series.
    pub fn selected_entry(&self) -> Option<&HourlyEntry> {
        let index = self.selected_hour?;
        self.forecast.data()?.hourly.get(index)
    }

    /// Busy: an attempt is in flight.
    pub fn is_busy(&self) -> bool {
        self.forecast.is_loading()
    }

    pub fn loading_anim_active(&self) -> bool {
        self.forecast.is_loading() || self.loading_anim_ticks_remaining > 0
    }
}
