//! Error types for the lookup flows.
//!
//! Every variant's `Display` output is the exact message returned to API
//! callers in the `{"error": ...}` body.

use thiserror::Error;

use crate::provider::ProviderId;

/// Transport failure, timeout, non-success status, or unreadable body from a
/// third-party provider.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} request failed: {reason}", .provider.display_name())]
pub struct UpstreamError {
    pub provider: ProviderId,
    pub reason: String,
}

impl UpstreamError {
    pub fn new(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self {
            provider,
            reason: reason.into(),
        }
    }
}

/// Malformed or out-of-range client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("address query param is required")]
    MissingAddress,

    #[error("Latitude or Longitude was not inputted, blank values were given.")]
    BlankCoordinates,

    #[error("Must be numeric and not be a string (e.g. 0.0)")]
    NotNumeric,

    #[error("Please enter a latitude value <= 90")]
    LatitudeAboveMax,

    #[error("Please enter a latitude value >= -90")]
    LatitudeBelowMin,

    #[error("Please enter a longitude value <= 180")]
    LongitudeAboveMax,

    #[error("Please enter a longitude value >= -180")]
    LongitudeBelowMin,
}

/// Everything that can end a lookup without a report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required provider key is not configured on the server.
    #[error("{} not configured", .0.key_env_var())]
    MissingKey(ProviderId),

    #[error("No geocoding results for that address")]
    NoGeocodingMatch,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_names_provider_and_cause() {
        let err = UpstreamError::new(ProviderId::Geocodio, "connection refused");
        assert_eq!(err.to_string(), "Geocodio request failed: connection refused");

        let err = UpstreamError::new(ProviderId::AirNow, "status 503");
        assert_eq!(err.to_string(), "AirNow request failed: status 503");
    }

    #[test]
    fn missing_key_message_uses_env_name() {
        assert_eq!(
            LookupError::MissingKey(ProviderId::Geocodio).to_string(),
            "GEOCODIO_API_KEY not configured"
        );
        assert_eq!(
            LookupError::MissingKey(ProviderId::AirNow).to_string(),
            "AIRNOW_API_KEY not configured"
        );
    }

    #[test]
    fn validation_messages_pass_through_lookup_error() {
        let err: LookupError = ValidationError::MissingAddress.into();
        assert_eq!(err.to_string(), "address query param is required");
    }

    #[test]
    fn upstream_messages_pass_through_lookup_error() {
        let err: LookupError = UpstreamError::new(ProviderId::AirNow, "timed out").into();
        assert_eq!(err.to_string(), "AirNow request failed: timed out");
    }
}
