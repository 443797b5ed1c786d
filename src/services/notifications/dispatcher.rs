//! Turns an inbound [`NotificationMessage`] into one provider send.

use std::fmt;
use std::sync::Arc;

use super::provider::PushProvider;
use crate::external::firebase::{Message, Notification};
use crate::models::NotificationMessage;

/// Result of a dispatch, rendered verbatim as the HTTP response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Sent => "Success Sending Notification",
            DispatchOutcome::Failed => "Error Sending Notification",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloning is cheap; the provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct NotificationDispatcher {
    provider: Arc<dyn PushProvider>,
}

impl NotificationDispatcher {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Sends `message` once. Provider errors are logged here and collapsed
    /// into [`DispatchOutcome::Failed`].
    pub async fn dispatch(&self, message: NotificationMessage) -> DispatchOutcome {
        let message = build_message(message);

        match self.provider.send(&message).await {
            Ok(receipt) => {
                tracing::info!(
                    provider = self.provider.name(),
                    message_id = %receipt.message_id,
                    "Notification sent"
                );
                DispatchOutcome::Sent
            }
            Err(e) => {
                let code = e.code().map(|c| c.as_str().to_string());
                tracing::error!(
                    provider = self.provider.name(),
                    error = %e,
                    code = code.as_deref().unwrap_or("-"),
                    "We could not send the notification"
                );
                DispatchOutcome::Failed
            }
        }
    }
}

/// Maps the request shape onto the FCM message. Title and body are copied
/// as given, empty strings included; the image is set only when present.
pub fn build_message(message: NotificationMessage) -> Message {
    let NotificationMessage {
        recipient_token,
        title,
        body,
        image_url,
        data,
    } = message;

    Message {
        token: recipient_token,
        notification: Some(Notification {
            title: Some(title),
            body: Some(body),
            image: image_url,
        }),
        data,
    }
}
