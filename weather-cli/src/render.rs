//! Human-readable output for the result panel.

use std::fmt::Write;

use weather_now_core::{Session, WeatherCategory, WeatherSnapshot};

const PLACEHOLDER: &str = "—";

pub const FOOTER: &str = "Data from Open-Meteo API (https://open-meteo.com/)";

pub fn icon(category: WeatherCategory) -> &'static str {
    match category {
        WeatherCategory::Clear => "☀️",
        WeatherCategory::Cloudy => "☁️",
        WeatherCategory::Rain => "🌧️",
        WeatherCategory::Snow => "❄️",
    }
}

fn timestamp(snapshot: &WeatherSnapshot) -> String {
    match (snapshot.observed_at_local(), snapshot.observed_at.as_deref()) {
        (Some(ts), _) => ts.format("%b %-d, %Y, %-I:%M %p").to_string(),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

pub fn snapshot(snapshot: &WeatherSnapshot) -> String {
    let category = snapshot.category();
    let temperature = snapshot
        .temperature_c
        .map(|t| format!("Temp : {t}°C"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let windspeed = snapshot
        .windspeed_kmh
        .map(|w| format!("{w} km/h"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", snapshot.display_name());
    let _ = writeln!(out, "{} {category}", icon(category));
    let _ = writeln!(out, "{temperature}");
    let _ = writeln!(out, "{}", snapshot.description());
    let _ = writeln!(out, "Windspeed: {windspeed}");
    let _ = write!(out, "Last updated: {}", timestamp(snapshot));
    out
}

/// Whatever the session currently has to show.
pub fn session(session: &Session) -> String {
    if session.is_loading() {
        return "Loading...".to_string();
    }

    let mut out = String::new();
    if let Some(error) = session.error() {
        out.push_str(error);
    }

    match session.snapshot() {
        Some(s) => out.push_str(&snapshot(s)),
        None if session.is_idle() => {
            out.push_str("Search for a city or use an example to see weather");
        }
        None => {}
    }

    out
}
