use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::conditions::describe;

/// A city search string with surrounding whitespace removed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim `raw`; `None` if nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// First candidate returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "auto".to_string()
}

impl GeocodeMatch {
    /// "Paris, France", or just the name when no country was reported.
    pub fn label(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// The `current` section of a forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    pub weather_code: i64,
    pub time: String,
}

/// Display-ready result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i64,
    /// Local observation time as sent by the service, e.g. "2024-05-01T12:00".
    pub observed: String,
}

impl CurrentConditions {
    pub fn new(place: &GeocodeMatch, reading: CurrentReading) -> Self {
        Self {
            location: place.label(),
            temperature_c: reading.temperature_2m,
            feels_like_c: reading.apparent_temperature,
            humidity_pct: reading.relative_humidity_2m,
            wind_speed_kmh: reading.wind_speed_10m,
            weather_code: reading.weather_code,
            observed: reading.time,
        }
    }

    pub fn condition(&self) -> &'static str {
        describe(self.weather_code)
    }

    /// Parsed observation time, if the service used a recognisable format.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&self.observed, fmt).ok())
    }
}

/// Round for display, halves going up: 17.5 -> 18, -0.5 -> 0.
pub fn round_display(value: f64) -> i64 {
    let rounded = value.round();
    // `round` sends negative halves away from zero.
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}
