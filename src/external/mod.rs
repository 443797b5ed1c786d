//! Outbound integrations

pub mod client;
pub mod firebase;
