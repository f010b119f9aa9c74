use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{air_quality, dashboard, health},
    state::AppState,
};

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/static/app.js", get(dashboard::script))
        .route("/health", get(health::health_check))
        .route("/api/air-quality", get(air_quality::by_address))
        .route(
            "/api/air-quality/coordinates-only",
            get(air_quality::by_coordinates),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
