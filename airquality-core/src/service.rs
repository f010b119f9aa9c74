//! The two lookup flows: address → geocode → observations, and
//! coordinates → observations.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    config::ApiKeys,
    error::LookupError,
    model::{AddressReport, CoordinatesReport, GeocodeResult},
    provider::{AirQualityProvider, Geocoder, ProviderId},
    validation::{validate_address, validate_coordinates},
};

/// Runs lookups against the configured providers. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AirQualityService {
    geocoder: Arc<dyn Geocoder>,
    air_quality: Arc<dyn AirQualityProvider>,
    keys: ApiKeys,
}

impl AirQualityService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        air_quality: Arc<dyn AirQualityProvider>,
        keys: ApiKeys,
    ) -> Self {
        Self {
            geocoder,
            air_quality,
            keys,
        }
    }

    fn require_key(&self, id: ProviderId) -> Result<&str, LookupError> {
        self.keys.key(id).ok_or(LookupError::MissingKey(id))
    }

    /// Resolve `raw_address` and fetch observations near it.
    #[instrument(skip(self))]
    pub async fn by_address(&self, raw_address: Option<&str>) -> Result<AddressReport, LookupError> {
        let address = validate_address(raw_address)?;

        let geocoding_key = self.require_key(ProviderId::Geocodio)?;
        let air_quality_key = self.require_key(ProviderId::AirNow)?;

        let geocoded = self.geocoder.geocode(address, geocoding_key).await?;
        let (Some(coordinate), GeocodeResult {
            latitude: Some(latitude),
            longitude: Some(longitude),
            formatted_address,
        }) = (geocoded.coordinate(), geocoded)
        else {
            debug!("geocoder returned no match");
            return Err(LookupError::NoGeocodingMatch);
        };

        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            formatted_address = %formatted_address,
            "address resolved"
        );

        let observations = self
            .air_quality
            .current_observations(coordinate, air_quality_key)
            .await?;

        Ok(AddressReport {
            input_address: address.to_string(),
            formatted_address,
            latitude,
            longitude,
            airnow_observations: observations,
        })
    }

    /// Validate raw `lat`/`lng` and fetch observations there.
    #[instrument(skip(self))]
    pub async fn by_coordinates(
        &self,
        lat_raw: Option<&str>,
        lng_raw: Option<&str>,
    ) -> Result<CoordinatesReport, LookupError> {
        let coordinate = validate_coordinates(lat_raw, lng_raw)?;
        let air_quality_key = self.require_key(ProviderId::AirNow)?;

        let observations = self
            .air_quality
            .current_observations(coordinate, air_quality_key)
            .await?;

        Ok(CoordinatesReport {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            airnow_observations: observations,
        })
    }
}
