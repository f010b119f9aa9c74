//! HTTP surface of the air-quality lookup service.
//!
//! This crate focuses on:
//! - Routing and handlers over `airquality-core`
//! - Translating lookup failures into JSON error responses
//! - Serving the dashboard page
//! - Process wiring (logging, graceful shutdown)

pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
