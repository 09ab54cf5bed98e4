//! Open-Meteo API client and location resolution

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::forecast::{CurrentConditions, ForecastBundle, HourlyEntry};
use crate::state::Location;

/// Bound on every network call; a hung service surfaces as `Timeout`
/// instead of leaving the UI busy forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ============================================================================
// Error taxonomy
// ============================================================================

/// All the ways a lookup attempt can fail. Each variant maps to the single
/// message line shown in the UI.
#[derive(Debug)]
pub enum ApiError {
    /// Neither a city name nor coordinates were supplied.
    MissingInput,
    /// Geocoding returned zero candidates.
    NotFound(String),
    /// IP geolocation failed or was unreachable.
    Geolocation(String),
    /// A network call exceeded [`REQUEST_TIMEOUT`].
    Timeout,
    /// Any other network or service failure.
    Request(reqwest::Error),
    /// The service answered with something we could not interpret.
    Malformed(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingInput => write!(f, "Enter a city or coordinates"),
            ApiError::NotFound(city) => write!(f, "City not found: {}", city),
            ApiError::Geolocation(msg) => write!(f, "Device location unavailable: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::Request(e) => write!(f, "Weather fetch failed: {}", e),
            ApiError::Malformed(msg) => write!(f, "Weather fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

fn request_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Request(e)
    }
}

fn client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(request_error)
}

// ============================================================================
// Coordinate input
// ============================================================================

/// Parse free-text input as a "lat,lon" pair.
///
/// Explicit coordinates take precedence over geocoding, so this is tried
/// first on every submit. Values are passed through unvalidated; an
/// out-of-range pair simply gets no meaningful data from the service.
pub fn parse_coordinates(input: &str) -> Option<Location> {
    let (lat, lon) = input.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some(Location {
        name: coordinate_label(lat, lon),
        lat,
        lon,
    })
}

/// Display label for a location entered as raw coordinates.
pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("Lat: {:.2}, Lon: {:.2}", lat, lon)
}

// ============================================================================
// Geocoding API
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

fn location_from_result(result: GeocodingResult) -> Location {
    let display_name = match &result.country {
        Some(country) => format!("{}, {}", result.name, country),
        None => result.name,
    };
    Location {
        name: display_name,
        lat: result.latitude,
        lon: result.longitude,
    }
}

/// Resolve a city name to coordinates using the Open-Meteo geocoding API.
/// The first candidate is used unconditionally; zero candidates is
/// [`ApiError::NotFound`].
pub async fn geocode_city(city: &str) -> Result<Location, ApiError> {
    let url = format!(
        "https://geocoding-api.open-meteo.com/v1/search?name={}&count=1&language=en",
        urlencoding::encode(city)
    );

    let response = client()?.get(&url).send().await.map_err(request_error)?;
    let data: GeocodingResponse = response.json().await.map_err(request_error)?;

    data.results
        .and_then(|results| results.into_iter().next())
        .map(location_from_result)
        .ok_or_else(|| ApiError::NotFound(city.to_string()))
}

// ============================================================================
// Forecast API
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f32,
    windspeed: f32,
    weathercode: u8,
}

/// Parallel, index-aligned arrays as the service delivers them. Horizon
/// length varies by request.
#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<f32>,
    windspeed_10m: Vec<f32>,
    weathercode: Vec<u8>,
}

/// Fetch current conditions and the full hourly series in one call.
pub async fn fetch_forecast(lat: f64, lon: f64) -> Result<ForecastBundle, ApiError> {
    let url = format!(
        "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}\
         &current_weather=true&hourly=temperature_2m,windspeed_10m,weathercode",
        lat, lon
    );

    let response = client()?.get(&url).send().await.map_err(request_error)?;
    let data: ForecastResponse = response.json().await.map_err(request_error)?;

    let current = CurrentConditions {
        temperature: data.current_weather.temperature,
        wind_speed: data.current_weather.windspeed,
        weather_code: data.current_weather.weathercode,
    };

    let hourly = data
        .hourly
        .time
        .iter()
        .zip(data.hourly.temperature_2m)
        .zip(data.hourly.windspeed_10m)
        .zip(data.hourly.weathercode)
        .map(|(((time, temperature), wind_speed), weather_code)| {
            let time = NaiveDateTime::parse_from_str(time, HOURLY_TIME_FORMAT)
                .map_err(|_| ApiError::Malformed(format!("bad hourly timestamp: {}", time)))?;
            Ok(HourlyEntry {
                time,
                temperature,
                wind_speed,
                weather_code,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(ForecastBundle { current, hourly })
}

// ============================================================================
// IP geolocation
// ============================================================================

#[derive(Debug, Deserialize)]
struct IpLocation {
    latitude: f64,
    longitude: f64,
    city: Option<String>,
}

/// Approximate the device location from the caller's IP address. Any failure
/// collapses into [`ApiError::Geolocation`]; no forecast fetch follows.
pub async fn locate_device() -> Result<Location, ApiError> {
    let response = client()?
        .get("https://ipapi.co/json/")
        .send()
        .await
        .map_err(|e| ApiError::Geolocation(e.to_string()))?;
    let data: IpLocation = response
        .json()
        .await
        .map_err(|e| ApiError::Geolocation(e.to_string()))?;

    let name = data
        .city
        .unwrap_or_else(|| coordinate_label(data.latitude, data.longitude));
    Ok(Location {
        name,
        lat: data.latitude,
        lon: data.longitude,
    })
}
