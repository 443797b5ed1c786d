//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::handlers;
use crate::api::middleware::{REQUEST_ID_HEADER, logging_middleware, request_id_middleware};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS (when origins are configured) answers preflight requests
/// 2. Request ID middleware generates/propagates request IDs
/// 3. Logging middleware logs requests with request IDs
///
/// No request-level timeout is applied: the FCM client's own timeout turns a
/// stalled send into `Error Sending Notification` with status 200.
///
/// # Routes
/// - `POST /notification` - Send a push notification
/// - `GET /health/live`, `GET /health/ready` - Probes
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(handlers::notifications::notification_routes())
        .merge(handlers::health::health_routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware));

    let router = match cors_layer(&server.cors_allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// `None` disables CORS; `*` allows any origin.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
            .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]),
    )
}
