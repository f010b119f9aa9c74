//! Core library for the air-quality lookup service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the geocoding (Geocodio) and air-quality (AirNow) providers
//! - Input validation and the two lookup flows built on top of them
//!
//! It is used by `airquality-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod validation;

pub use config::{ApiKeys, Config, ProviderConfig, ServerConfig};
pub use error::{LookupError, UpstreamError, ValidationError};
pub use model::{AddressReport, Coordinate, CoordinatesReport, GeocodeResult};
pub use provider::{
    AirQualityProvider, Geocoder, ProviderId, air_quality_from_config,
    airnow::AirNowClient, geocoder_from_config, geocodio::GeocodioClient,
};
pub use service::AirQualityService;
