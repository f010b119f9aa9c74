use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Outcome of a geocoding lookup. Absent coordinates mean "no match".
///
/// Coordinates keep the provider's number representation so they can be
/// echoed back unchanged (`37` stays `37`, not `37.0`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeResult {
    pub latitude: Option<Number>,
    pub longitude: Option<Number>,
    pub formatted_address: String,
}

impl GeocodeResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    /// A match at `latitude`/`longitude`; non-finite values count as absent.
    pub fn located(latitude: f64, longitude: f64, formatted_address: impl Into<String>) -> Self {
        Self {
            latitude: Number::from_f64(latitude),
            longitude: Number::from_f64(longitude),
            formatted_address: formatted_address.into(),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.latitude.as_ref()?.as_f64()?;
        let lng = self.longitude.as_ref()?.as_f64()?;
        Some(Coordinate::new(lat, lng))
    }
}

/// Response body for an address lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressReport {
    pub input_address: String,
    pub formatted_address: String,
    pub latitude: Number,
    pub longitude: Number,
    pub airnow_observations: Value,
}

/// Response body for a coordinates lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesReport {
    pub latitude: f64,
    pub longitude: f64,
    pub airnow_observations: Value,
}
