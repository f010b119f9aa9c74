//! Translation of lookup failures into JSON error responses.

use airquality_core::{LookupError, UpstreamError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Error returned by the API handlers. Renders as `{"error": "..."}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub LookupError);

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self(err.into())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LookupError::Validation(_) => StatusCode::BAD_REQUEST,
            LookupError::MissingKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::NoGeocodingMatch => StatusCode::NOT_FOUND,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        match &self.0 {
            LookupError::MissingKey(id) => {
                error!(provider = %id, "{message}");
            }
            LookupError::Upstream(e) => {
                warn!(provider = %e.provider, reason = %e.reason, "upstream request failed");
            }
            LookupError::Validation(_) | LookupError::NoGeocodingMatch => {
                debug!(status = status.as_u16(), "{message}");
            }
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
