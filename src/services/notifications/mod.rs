//! Push notification delivery.
//!
//! [`NotificationDispatcher`] builds the FCM message and hands it to a
//! [`PushProvider`]; the production provider is the shared `FirebaseApp`.

mod dispatcher;
mod fcm_provider;
mod provider;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher, build_message};
pub use provider::PushProvider;
