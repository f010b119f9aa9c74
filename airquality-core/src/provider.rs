use crate::{
    Config,
    error::UpstreamError,
    model::{Coordinate, GeocodeResult},
    provider::{airnow::AirNowClient, geocodio::GeocodioClient},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{convert::TryFrom, fmt::Debug, sync::Arc, time::Duration};

pub mod airnow;
pub mod geocodio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Geocodio,
    AirNow,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Geocodio => "geocodio",
            ProviderId::AirNow => "airnow",
        }
    }

    /// Human-facing provider name used in upstream error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Geocodio => "Geocodio",
            ProviderId::AirNow => "AirNow",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_env_var(&self) -> &'static str {
        match self {
            ProviderId::Geocodio => "GEOCODIO_API_KEY",
            ProviderId::AirNow => "AIRNOW_API_KEY",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderId::Geocodio => "https://api.geocod.io/v1.7/geocode",
            ProviderId::AirNow => "https://www.airnowapi.org/aq/observation/latLong/current/",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Geocodio, ProviderId::AirNow]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "geocodio" => Ok(ProviderId::Geocodio),
            "airnow" => Ok(ProviderId::AirNow),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: geocodio, airnow."
            )),
        }
    }
}

/// Resolves a free-text address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodeResult, UpstreamError>;
}

/// Fetches current observations near a coordinate. The payload is relayed as-is.
#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    async fn current_observations(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<Value, UpstreamError>;
}

/// Construct the geocoding client from config.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn Geocoder>> {
    let client = GeocodioClient::new(
        config.provider_endpoint(ProviderId::Geocodio),
        config.request_timeout(),
    )?;
    Ok(Arc::new(client))
}

/// Construct the air-quality client from config.
pub fn air_quality_from_config(config: &Config) -> anyhow::Result<Arc<dyn AirQualityProvider>> {
    let client = AirNowClient::new(
        config.provider_endpoint(ProviderId::AirNow),
        config.request_timeout(),
    )?;
    Ok(Arc::new(client))
}

pub(crate) fn build_http_client(id: ProviderId, timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build {} HTTP client: {e}", id.display_name()))
}

/// Turn a transport-level failure into an upstream error without echoing the
/// request URL, which carries the API key.
pub(crate) fn transport_error(id: ProviderId, err: reqwest::Error) -> UpstreamError {
    let reason = if err.is_timeout() {
        format!("request timed out ({})", err.without_url())
    } else {
        err.without_url().to_string()
    };
    UpstreamError::new(id, reason)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
