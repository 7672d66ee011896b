//! WMO weather code lookups: coarse icon category and short text.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse visual category used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Snow => "snow",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a weather code to its category. Missing and unlisted codes are `Clear`,
/// including fog (45, 48) and thunderstorm (95).
pub fn classify(code: Option<i64>) -> WeatherCategory {
    match code {
        Some(0 | 1) | None => WeatherCategory::Clear,
        Some(2 | 3) => WeatherCategory::Cloudy,
        Some(51..=65) => WeatherCategory::Rain,
        Some(71..=75) => WeatherCategory::Snow,
        Some(_) => WeatherCategory::Clear,
    }
}

pub fn known_description(code: i64) -> Option<&'static str> {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        95 => "Thunderstorm",
        _ => return None,
    };

    Some(text)
}

/// Short English description. Unknown codes keep the raw value in the text.
pub fn describe(code: Option<i64>) -> String {
    match code {
        Some(c) => match known_description(c) {
            Some(text) => text.to_string(),
            None => format!("Weather code: {c}"),
        },
        None => "Weather code: unknown".to_string(),
    }
}
