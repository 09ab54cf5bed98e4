//! Weather condition catalog - WMO code to label and glyph

/// A classified weather condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub glyph: &'static str,
}

/// Condition categories grouped by WMO code ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sky {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Showers,
    Thunderstorm,
    Unknown,
}

impl Sky {
    /// Map a WMO weather code to its category. Total over u8: codes not in
    /// the catalog fall through to `Unknown`.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Sky::ClearSky,
            1 => Sky::MainlyClear,
            2 => Sky::PartlyCloudy,
            3 => Sky::Overcast,
            45 | 48 => Sky::Fog,
            51..=57 => Sky::Drizzle,
            61..=67 => Sky::Rain,
            71..=77 | 85 | 86 => Sky::Snow,
            80..=82 => Sky::Showers,
            95..=99 => Sky::Thunderstorm,
            _ => Sky::Unknown,
        }
    }

    pub fn condition(self) -> Condition {
        match self {
            Sky::ClearSky => Condition {
                label: "Clear Sky",
                glyph: "\u{2600}\u{fe0f}",
            },
            Sky::MainlyClear => Condition {
                label: "Mainly Clear",
                glyph: "\u{1f324}\u{fe0f}",
            },
            Sky::PartlyCloudy => Condition {
                label: "Partly Cloudy",
                glyph: "\u{26c5}",
            },
            Sky::Overcast => Condition {
                label: "Overcast",
                glyph: "\u{2601}\u{fe0f}",
            },
            Sky::Fog => Condition {
                label: "Foggy",
                glyph: "\u{1f32b}\u{fe0f}",
            },
            Sky::Drizzle => Condition {
                label: "Drizzle",
                glyph: "\u{1f326}\u{fe0f}",
            },
            Sky::Rain => Condition {
                label: "Rainy",
                glyph: "\u{1f327}\u{fe0f}",
            },
            Sky::Snow => Condition {
                label: "Snowy",
                glyph: "\u{2744}\u{fe0f}",
            },
            Sky::Showers => Condition {
                label: "Showers",
                glyph: "\u{1f327}\u{fe0f}",
            },
            Sky::Thunderstorm => Condition {
                label: "Thunderstorm",
                glyph: "\u{26c8}\u{fe0f}",
            },
            // Wind glyph, matching the catalog's designated fallback
            Sky::Unknown => Condition {
                label: "Unknown",
                glyph: "\u{1f4a8}",
            },
        }
    }
}

/// Classify a WMO weather code. Total: every code yields a defined entry.
pub fn classify(code: u8) -> Condition {
    Sky::from_code(code).condition()
}
