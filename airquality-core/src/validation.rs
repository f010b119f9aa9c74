//! Input validation for the two lookup flows.

use crate::{error::ValidationError, model::Coordinate};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Trim the raw `address` parameter; missing or blank is rejected.
pub fn validate_address(raw: Option<&str>) -> Result<&str, ValidationError> {
    let address = raw.unwrap_or_default().trim();
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    Ok(address)
}

/// Parse and range-check raw `lat`/`lng` parameters.
///
/// Checks run in a fixed order and only the first failure is reported:
/// presence, numeric parse, then latitude upper/lower and longitude
/// upper/lower bounds.
pub fn validate_coordinates(
    lat_raw: Option<&str>,
    lng_raw: Option<&str>,
) -> Result<Coordinate, ValidationError> {
    let (lat_raw, lng_raw) = match (lat_raw, lng_raw) {
        (Some(lat), Some(lng)) if !lat.is_empty() && !lng.is_empty() => (lat, lng),
        _ => return Err(ValidationError::BlankCoordinates),
    };

    let latitude = parse_number(lat_raw)?;
    let longitude = parse_number(lng_raw)?;

    check_range(Coordinate::new(latitude, longitude))
}

fn parse_number(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        // NaN compares false against every bound and would slip through.
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ValidationError::NotNumeric),
    }
}

fn check_range(coordinate: Coordinate) -> Result<Coordinate, ValidationError> {
    let Coordinate { latitude, longitude } = coordinate;

    if latitude > MAX_LATITUDE {
        Err(ValidationError::LatitudeAboveMax)
    } else if latitude < -MAX_LATITUDE {
        Err(ValidationError::LatitudeBelowMin)
    } else if longitude > MAX_LONGITUDE {
        Err(ValidationError::LongitudeAboveMax)
    } else if longitude < -MAX_LONGITUDE {
        Err(ValidationError::LongitudeBelowMin)
    } else {
        Ok(coordinate)
    }
}
