//! Push provider abstraction.
//!
//! The dispatcher talks to FCM only through this trait so handlers and tests
//! can swap in a stub without network access.

use async_trait::async_trait;

use crate::external::firebase::{FcmError, Message, SendReceipt};

/// A service that delivers a [`Message`] to one recipient token.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Makes exactly one delivery attempt.
    async fn send(&self, message: &Message) -> Result<SendReceipt, FcmError>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
