use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{error::UpstreamError, model::GeocodeResult};

use super::{Geocoder, ProviderId, build_http_client, transport_error, truncate_body};

const PROVIDER: ProviderId = ProviderId::Geocodio;

/// Geocodio forward-geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodioClient {
    endpoint: String,
    http: Client,
}

impl GeocodioClient {
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

// Every field is optional: Geocodio may omit a key or send `null`, and both
// mean the same thing.
#[derive(Debug, Deserialize)]
struct GcLocation {
    lat: Option<Number>,
    lng: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct GcResult {
    location: Option<GcLocation>,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GcResponse {
    results: Option<Vec<GcResult>>,
}

impl From<GcResponse> for GeocodeResult {
    fn from(response: GcResponse) -> Self {
        let Some(first) = response.results.unwrap_or_default().into_iter().next() else {
            return GeocodeResult::no_match();
        };

        let (latitude, longitude) = first
            .location
            .map_or((None, None), |loc| (loc.lat, loc.lng));

        GeocodeResult {
            latitude,
            longitude,
            formatted_address: first.formatted_address.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Geocoder for GeocodioClient {
    #[instrument(skip(self, api_key))]
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodeResult, UpstreamError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", address), ("api_key", api_key), ("limit", "1")])
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

        let parsed: GcResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::new(PROVIDER, format!("invalid JSON response: {e}")))?;

        debug!(
            results = parsed.results.as_ref().map_or(0, Vec::len),
            "geocoding response received"
        );

        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn parse(body: &str) -> GeocodeResult {
        serde_json::from_str::<GcResponse>(body).unwrap().into()
    }

    #[test]
    fn empty_results_is_no_match() {
        assert_eq!(parse(r#"{"input": {}, "results": []}"#), GeocodeResult::no_match());
        assert_eq!(parse("{}"), GeocodeResult::no_match());
    }

    #[test]
    fn null_results_is_no_match() {
        assert_eq!(parse(r#"{"results": null}"#), GeocodeResult::no_match());
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let result = parse(
            r#"{"results": [{"location": {"lat": 1.5, "lng": 2.5}, "formatted_address": null}]}"#,
        );
        assert_eq!(result.formatted_address, "");
        assert!(result.coordinate().is_some());

        let result = parse(r#"{"results": [{"location": null, "formatted_address": "X"}]}"#);
        assert_eq!(result.coordinate(), None);

        let result = parse(r#"{"results": [{"location": {"lat": null, "lng": 2.5}}]}"#);
        assert_eq!(result.coordinate(), None);
    }

    #[test]
    fn integer_coordinates_keep_their_representation() {
        let result = parse(r#"{"results": [{"location": {"lat": 37, "lng": -122}}]}"#);
        assert_eq!(result.latitude, Some(Number::from(37)));
        assert_eq!(result.longitude, Some(Number::from(-122)));
        assert_eq!(result.coordinate(), Some(Coordinate::new(37.0, -122.0)));
    }

    #[test]
    fn first_result_is_used_verbatim() {
        let result = parse(
            r#"{"results": [
                {"location": {"lat": 37.422, "lng": -122.084}, "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043", "accuracy": 1},
                {"location": {"lat": 1.0, "lng": 2.0}, "formatted_address": "elsewhere"}
            ]}"#,
        );

        assert_eq!(result.coordinate(), Some(Coordinate::new(37.422, -122.084)));
        assert_eq!(result.formatted_address, "1600 Amphitheatre Pkwy, Mountain View, CA 94043");
    }

    #[test]
    fn missing_location_leaves_coordinates_absent() {
        let result = parse(r#"{"results": [{"formatted_address": "Somewhere"}]}"#);
        assert_eq!(result.coordinate(), None);
        assert_eq!(result.formatted_address, "Somewhere");
    }

    #[test]
    fn missing_formatted_address_is_empty() {
        let result = parse(r#"{"results": [{"location": {"lat": 1.5, "lng": 2.5}}]}"#);
        assert_eq!(result.formatted_address, "");
        assert!(result.coordinate().is_some());
    }
}
