//! Forecast data model and the hourly window filter

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of upcoming hours shown in the picker.
pub const FORECAST_WINDOW: usize = 12;

/// Current conditions at the resolved location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temperature: f32,
    pub wind_speed: f32,
    pub weather_code: u8,
}

/// One hour of forecast data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub temperature: f32,
    pub wind_speed: f32,
    pub weather_code: u8,
}

/// Current conditions and the upcoming hourly series, replaced as a unit on
/// every successful fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
}

impl ForecastBundle {
    /// Trim the hourly series down to the next [`FORECAST_WINDOW`] hours
    /// after `now`.
    pub fn windowed(mut self, now: NaiveDateTime) -> Self {
        self.hourly = upcoming_hours(self.hourly, now);
        self
    }
}

/// The ordered subsequence of `series` strictly later than `now`, truncated
/// to at most [`FORECAST_WINDOW`] entries. Empty when no future entries
/// exist; the service decides the horizon length, so no fixed count is
/// assumed.
pub fn upcoming_hours(series: Vec<HourlyEntry>, now: NaiveDateTime) -> Vec<HourlyEntry> {
    series
        .into_iter()
        .filter(|entry| entry.time > now)
        .take(FORECAST_WINDOW)
        .collect()
}
