//! City name → current weather, as one sequential pipeline:
//! validate the query, geocode it, keep the first match, fetch current weather, normalize.

use serde_json::Value;

use crate::{
    Config, Location, Query, ResolveError, WeatherSnapshot,
    provider::{CurrentWeatherPayload, GeocodingResponse, WeatherSource, source_from_config},
};

#[derive(Debug)]
pub struct Resolver {
    source: Box<dyn WeatherSource>,
}

impl Resolver {
    pub fn new(source: Box<dyn WeatherSource>) -> Self {
        Self { source }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(source_from_config(config)?))
    }

    /// Resolve free text to a snapshot. Blank input yields `Ok(None)` without touching the network.
    pub async fn resolve(&self, input: &str) -> Result<Option<WeatherSnapshot>, ResolveError> {
        let Some(query) = Query::parse(input) else {
            tracing::debug!("ignoring empty query");
            return Ok(None);
        };

        self.resolve_query(&query).await.map(Some)
    }

    pub async fn resolve_query(&self, query: &Query) -> Result<WeatherSnapshot, ResolveError> {
        let result = self.fetch(query).await;

        if let Err(err) = &result {
            tracing::warn!(query = query.as_str(), kind = ?err.kind(), "resolution failed: {err}");
        }

        result
    }

    async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, ResolveError> {
        let geocoded = self.source.search(query.as_str()).await?;
        let location = first_location(geocoded, query)?;

        tracing::info!(
            name = %location.name,
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved location"
        );

        let forecast = self.source.current_weather(location.latitude, location.longitude).await?;

        Ok(normalize(location, forecast.current_weather.unwrap_or_default()))
    }
}

/// First ranked match, rejected when either coordinate is not finite.
pub fn first_location(response: GeocodingResponse, query: &Query) -> Result<Location, ResolveError> {
    let best = response
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or(ResolveError::NotFound)?;

    if !best.latitude.is_finite() || !best.longitude.is_finite() {
        return Err(ResolveError::InvalidCoordinates);
    }

    Ok(Location {
        name: best.name.unwrap_or_else(|| query.as_str().to_string()),
        country: best.country,
        latitude: best.latitude,
        longitude: best.longitude,
    })
}

pub fn normalize(location: Location, current: CurrentWeatherPayload) -> WeatherSnapshot {
    WeatherSnapshot {
        location_name: location.name,
        country: location.country,
        temperature_c: finite_number(current.temperature.as_ref()),
        windspeed_kmh: finite_number(current.windspeed.as_ref()),
        observed_at: non_empty_string(current.time.as_ref()),
        weather_code: integer_code(current.weathercode.as_ref()),
    }
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value?.as_f64().filter(|v| v.is_finite())
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value?.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn integer_code(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(code) = value.as_i64() {
        return Some(code);
    }

    // 3.0 is still code 3; 3.5 is not a code.
    value
        .as_f64()
        .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64)
        .map(|v| v as i64)
}
