//! [`PushProvider`] backed by the shared [`FirebaseApp`]

use async_trait::async_trait;

use super::provider::PushProvider;
use crate::external::firebase::{FcmError, FirebaseApp, Message, SendReceipt};

#[async_trait]
impl PushProvider for FirebaseApp {
    async fn send(&self, message: &Message) -> Result<SendReceipt, FcmError> {
        self.messaging().send(message).await
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
