use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Config, Endpoint, ResolveError,
    provider::{ForecastResponse, GeocodingResponse, WeatherSource},
};

/// Open-Meteo geocoding + forecast over plain HTTP GET, no key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), geocoding_url, forecast_url)
    }

    pub fn with_client(
        http: Client,
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            geocoding_url: trim_base(geocoding_url.into()),
            forecast_url: trim_base(forecast_url.into()),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::with_client(http, &config.geocoding_url, &config.forecast_url))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ResolveError> {
        tracing::debug!(%endpoint, url, ?query, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ResolveError::Transport { endpoint, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(ResolveError::Status { endpoint, status: status.as_u16() });
        }

        let body = res.text().await.map_err(|source| ResolveError::Transport { endpoint, source })?;

        serde_json::from_str(&body).map_err(|e| ResolveError::Decode {
            endpoint,
            detail: format!("{e} in body: {}", truncate_body(&body)),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn search(&self, name: &str) -> Result<GeocodingResponse, ResolveError> {
        let url = format!("{}/v1/search", self.geocoding_url);
        self.get_json(Endpoint::Geocoding, &url, &[("name", name.to_string())]).await
    }

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, ResolveError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
        ];

        self.get_json(Endpoint::Forecast, &url, &query).await
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
