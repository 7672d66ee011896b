use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::wmo::{self, WeatherCategory};

/// A trimmed, non-empty place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First geocoding match, with finite coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Normalized current weather for one location. `None` means the upstream had no usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature_c: Option<f64>,
    pub windspeed_kmh: Option<f64>,
    /// Raw ISO-8601 timestamp as sent upstream.
    pub observed_at: Option<String>,
    pub weather_code: Option<i64>,
}

impl WeatherSnapshot {
    pub fn category(&self) -> WeatherCategory {
        wmo::classify(self.weather_code)
    }

    pub fn description(&self) -> String {
        wmo::describe(self.weather_code)
    }

    /// "New York, United States", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {country}", self.location_name),
            None => self.location_name.clone(),
        }
    }

    /// Observation time in the location's local clock. Open-Meteo sends minute precision.
    pub fn observed_at_local(&self) -> Option<NaiveDateTime> {
        let raw = self.observed_at.as_deref()?;

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}
