//! Notification endpoint.

use axum::{Json, Router, extract::State, routing::post};

use crate::models::NotificationMessage;
use crate::state::AppState;

/// Creates notification routes.
///
/// # Routes
/// - `POST /notification` - Send one push notification
pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/notification", post(send_notification))
}

/// POST /notification
///
/// Always answers `200 OK` with a `text/plain` body of either
/// `Success Sending Notification` or `Error Sending Notification`.
/// Bodies that are not JSON are rejected by the extractor before dispatch.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(message): Json<NotificationMessage>,
) -> &'static str {
    state
        .services
        .notifications
        .dispatch(message)
        .await
        .as_str()
}
