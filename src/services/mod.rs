//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and sit between the HTTP handlers and
//! the external providers.

pub mod notifications;

pub use notifications::NotificationDispatcher;

use std::sync::Arc;

use notifications::PushProvider;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub notifications: NotificationDispatcher,
}

impl Services {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self {
            notifications: NotificationDispatcher::new(provider),
        }
    }
}
