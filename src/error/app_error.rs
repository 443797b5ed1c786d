use thiserror::Error;

use crate::config::ConfigError;
use crate::external::firebase::{CredentialError, FcmError};
use crate::logger::LoggerError;

/// Application-wide error type for the CLI and startup path.
///
/// Request handling never surfaces this type: the notification endpoint always
/// answers with one of its two fixed strings.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// The service-account credential could not be loaded
    #[error("Firebase credential error")]
    Credential(#[from] CredentialError),

    /// FCM rejected or failed a send issued outside the HTTP endpoint
    #[error("Firebase messaging error")]
    Messaging(#[from] FcmError),

    /// A send issued from the CLI was not accepted by the provider
    #[error("Notification was not delivered")]
    DeliveryFailed,

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<LoggerError> for AppError {
    fn from(error: LoggerError) -> Self {
        AppError::Configuration {
            key: "logger".to_string(),
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_validation_error_keeps_field() {
        let err: AppError = ConfigError::validation("server.port", "Port must be non-zero").into();

        match &err {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("unexpected variant: {other:?}"),
        }
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("Port must be non-zero"));
    }

    #[test]
    fn test_logger_error_maps_to_configuration() {
        let err: AppError = LoggerError::config("bad level").into();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "logger"));
    }

    #[test]
    fn test_credential_error_conversion() {
        let err: AppError = CredentialError::MissingField("client_email").into();
        assert!(matches!(err, AppError::Credential(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_delivery_failure_message() {
        assert_eq!(
            AppError::DeliveryFailed.to_string(),
            "Notification was not delivered"
        );
    }

    #[test]
    fn test_anyhow_becomes_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Internal error");
    }
}
