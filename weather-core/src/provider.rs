use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt::Debug;

use crate::{Config, ResolveError, provider::open_meteo::OpenMeteo};

pub mod open_meteo;

/// Geocoding search payload. `results` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

/// One ranked geocoding match. Coordinates that are missing or not numbers decode as NaN.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    #[serde(default = "nan", deserialize_with = "number_or_nan")]
    pub latitude: f64,
    #[serde(default = "nan", deserialize_with = "number_or_nan")]
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Forecast payload requested with `current_weather=true`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeatherPayload>,
}

/// Kept as raw JSON values; the resolver decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeatherPayload {
    #[serde(default)]
    pub temperature: Option<serde_json::Value>,
    #[serde(default)]
    pub windspeed: Option<serde_json::Value>,
    #[serde(default)]
    pub time: Option<serde_json::Value>,
    #[serde(default)]
    pub weathercode: Option<serde_json::Value>,
}

fn nan() -> f64 {
    f64::NAN
}

fn number_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).unwrap_or(f64::NAN))
}

/// The two upstream lookups the resolver chains together.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn search(&self, name: &str) -> Result<GeocodingResponse, ResolveError>;

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, ResolveError>;
}

/// Construct the Open-Meteo source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    Ok(Box::new(OpenMeteo::from_config(config)?))
}
