//! API route handlers
//!
//! Routes are organized by resource:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `lost_items`: Lost-item reports filed by students
//! - `found_items`: Found items logged by staff
//! - `claims`: Ownership claims and their automatic verification
//! - `matching`: Ranking available found items against a lost-item report

pub mod claims;
pub mod found_items;
pub mod health;
pub mod lost_items;
pub mod matching;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Lost & Found Server",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Lost & Found Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/lost-items",
            "/api/v1/lost-items/user/{user_id}",
            "/api/v1/lost-items/{id}/matches",
            "/api/v1/found-items",
            "/api/v1/found-items/{id}",
            "/api/v1/found-items/{id}/status",
            "/api/v1/found-items/{id}/claims",
            "/api/v1/claims",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound("Route not found".to_string())
}
