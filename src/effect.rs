//! Effects - side effects declared by the reducer
//!
//! Each variant carries the attempt sequence so completions can be matched
//! against the attempt that requested them.

use crate::state::Location;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Resolve a city name to coordinates via geocoding
    Geocode { seq: u64, city: String },
    /// Fetch current conditions and hourly series for resolved coordinates
    FetchForecast { seq: u64, location: Location },
    /// Approximate the device location from the caller's IP address
    Locate { seq: u64 },
}
