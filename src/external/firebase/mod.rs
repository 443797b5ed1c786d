//! Firebase Cloud Messaging over the HTTP v1 API
//!
//! - [`credentials`]: service-account key loading
//! - [`auth`]: OAuth2 access tokens from the key
//! - [`client`]: `messages:send`
//! - [`app`]: the named, authenticated handle shared by the server

pub mod app;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use app::{FirebaseApp, FirebaseOptions};
pub use client::{FcmClient, FcmClientOptions};
pub use credentials::ServiceAccountKey;
pub use error::{CredentialError, FcmError, MessagingErrorCode};
pub use types::{Message, Notification, SendReceipt};
