use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{error::UpstreamError, model::Coordinate};

use super::{AirQualityProvider, ProviderId, build_http_client, transport_error, truncate_body};

const PROVIDER: ProviderId = ProviderId::AirNow;

/// Search radius around the coordinate, in miles.
pub const SEARCH_DISTANCE: u32 = 25;

const RESPONSE_FORMAT: &str = "application/json";

/// Query-string form of a coordinate component. Whole numbers keep one
/// decimal place (`40.0`, not `40`).
fn query_number(value: f64) -> String {
    format!("{value:?}")
}

/// AirNow current-observations-by-location client.
#[derive(Debug, Clone)]
pub struct AirNowClient {
    endpoint: String,
    http: Client,
}

impl AirNowClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            http: build_http_client(PROVIDER, timeout)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AirQualityProvider for AirNowClient {
    #[instrument(skip(self, api_key))]
    async fn current_observations(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<Value, UpstreamError> {
        // Parameter names are fixed by the AirNow API.
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("format", RESPONSE_FORMAT),
                ("latitude", &query_number(coordinate.latitude)),
                ("longitude", &query_number(coordinate.longitude)),
                ("distance", &SEARCH_DISTANCE.to_string()),
                ("API_KEY", api_key),
            ])
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        if !status.is_success() {
            return Err(UpstreamError::new(
                PROVIDER,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        let observations: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::new(PROVIDER, format!("invalid JSON response: {e}")))?;

        debug!(
            records = observations.as_array().map_or(1, Vec::len),
            "observations received"
        );

        Ok(observations)
    }
}
