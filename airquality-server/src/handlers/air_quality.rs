//! Air-quality lookup endpoints.

use airquality_core::{AddressReport, CoordinatesReport};
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query strings are taken as raw pairs so that no input is rejected before
/// validation can answer with a JSON error.
type QueryParams = Query<Vec<(String, String)>>;

/// First value given for `key`; later repeats are ignored.
fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// GET /api/air-quality?address=...
#[instrument(skip_all)]
pub async fn by_address(
    State(state): State<AppState>,
    Query(params): QueryParams,
) -> Result<Json<AddressReport>, ApiError> {
    let report = state
        .service
        .by_address(first(&params, "address"))
        .await?;

    Ok(Json(report))
}

/// GET /api/air-quality/coordinates-only?lat=...&lng=...
#[instrument(skip_all)]
pub async fn by_coordinates(
    State(state): State<AppState>,
    Query(params): QueryParams,
) -> Result<Json<CoordinatesReport>, ApiError> {
    let report = state
        .service
        .by_coordinates(first(&params, "lat"), first(&params, "lng"))
        .await?;

    Ok(Json(report))
}
