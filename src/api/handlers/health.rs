//! Health check endpoint handlers.
//!
//! Neither probe calls FCM.

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Readiness response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub app_name: String,
    pub project_id: String,
    /// Timestamp of the check (RFC 3339)
    pub timestamp: String,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

/// Readiness probe endpoint.
///
/// The server only starts after the Firebase app is registered, so a response
/// here means the service can accept notifications.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready".to_string(),
        version: crate::pkg_version().to_string(),
        app_name: state.provider.app_name.clone(),
        project_id: state.provider.project_id.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
    })
}

/// Liveness probe endpoint.
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
