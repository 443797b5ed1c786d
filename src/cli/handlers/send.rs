//! Send command handler
//!
//! Sends a single notification through the same dispatcher the server uses.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::NotificationMessage;
use crate::server::register_firebase_app;
use crate::services::NotificationDispatcher;
use crate::services::notifications::DispatchOutcome;

pub struct SendCommandHandler {
    config: Settings,
    message: NotificationMessage,
}

impl SendCommandHandler {
    pub fn new(
        config: Settings,
        token: String,
        title: String,
        body: String,
        image: Option<String>,
        data: Vec<(String, String)>,
    ) -> Self {
        Self {
            config,
            message: NotificationMessage {
                recipient_token: token,
                title,
                body,
                image_url: image,
                data: data.into_iter().collect::<HashMap<_, _>>(),
            },
        }
    }

    pub async fn execute(self) -> AppResult<()> {
        let app = register_firebase_app(&self.config.firebase)?;
        let dispatcher = NotificationDispatcher::new(Arc::new(app));
        self.send_with(&dispatcher).await
    }

    /// Prints the outcome string; a failed send becomes an error so the
    /// process exits non-zero.
    pub async fn send_with(self, dispatcher: &NotificationDispatcher) -> AppResult<()> {
        let outcome = dispatcher.dispatch(self.message).await;
        println!("{outcome}");

        match outcome {
            DispatchOutcome::Sent => Ok(()),
            DispatchOutcome::Failed => Err(AppError::DeliveryFailed),
        }
    }

    pub fn message(&self) -> &NotificationMessage {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::firebase::{FcmError, Message, MessagingErrorCode, SendReceipt};
    use crate::services::notifications::PushProvider;
    use async_trait::async_trait;

    struct FixedProvider(bool);

    #[async_trait]
    impl PushProvider for FixedProvider {
        async fn send(&self, _message: &Message) -> Result<SendReceipt, FcmError> {
            if self.0 {
                Ok(SendReceipt {
                    message_id: "0:42".to_string(),
                })
            } else {
                Err(FcmError::Api {
                    status: 400,
                    code: MessagingErrorCode::InvalidArgument,
                    message: "bad token".to_string(),
                })
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn handler() -> SendCommandHandler {
        SendCommandHandler::new(
            Settings::default(),
            "abc123".to_string(),
            "Hi".to_string(),
            "Hello".to_string(),
            None,
            vec![("k".to_string(), "v".to_string())],
        )
    }

    #[test]
    fn test_builds_message_from_args() {
        let handler = handler();
        assert_eq!(handler.message().recipient_token, "abc123");
        assert_eq!(handler.message().data.get("k").map(String::as_str), Some("v"));
    }

    #[tokio::test]
    async fn test_successful_send() {
        let dispatcher = NotificationDispatcher::new(Arc::new(FixedProvider(true)));
        assert!(handler().send_with(&dispatcher).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_send_is_an_error() {
        let dispatcher = NotificationDispatcher::new(Arc::new(FixedProvider(false)));
        assert!(matches!(
            handler().send_with(&dispatcher).await,
            Err(AppError::DeliveryFailed)
        ));
    }
}
