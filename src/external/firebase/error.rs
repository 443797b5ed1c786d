//! Error types for the FCM client

use std::fmt;

use thiserror::Error;

/// Errors raised while loading a service-account credential
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read credential file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential file is not valid service-account JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported credential type '{0}', expected 'service_account'")]
    UnsupportedType(String),

    #[error("Credential field '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("Credential private key is not a valid RSA PEM key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
}

/// Errors raised while authenticating with Google or sending a message
#[derive(Debug, Error)]
pub enum FcmError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to sign OAuth2 assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OAuth2 token request failed with status {status}: {body}")]
    TokenRequest { status: u16, body: String },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("FCM rejected the message with status {status} ({code}): {message}")]
    Api {
        status: u16,
        code: MessagingErrorCode,
        message: String,
    },
}

impl FcmError {
    /// FCM error code when the API itself rejected the message
    pub fn code(&self) -> Option<&MessagingErrorCode> {
        match self {
            FcmError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// FCM v1 error codes
///
/// See <https://firebase.google.com/docs/reference/fcm/rest/v1/ErrorCode>.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagingErrorCode {
    InvalidArgument,
    Unregistered,
    SenderIdMismatch,
    QuotaExceeded,
    Unavailable,
    Internal,
    ThirdPartyAuthError,
    Unknown(String),
}

impl MessagingErrorCode {
    /// Parses an `errorCode` from an `FcmError` detail entry.
    pub fn from_fcm_code(code: &str) -> Self {
        match code {
            "INVALID_ARGUMENT" => Self::InvalidArgument,
            "UNREGISTERED" => Self::Unregistered,
            "SENDER_ID_MISMATCH" => Self::SenderIdMismatch,
            "QUOTA_EXCEEDED" => Self::QuotaExceeded,
            "UNAVAILABLE" => Self::Unavailable,
            "INTERNAL" => Self::Internal,
            "THIRD_PARTY_AUTH_ERROR" => Self::ThirdPartyAuthError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Maps a canonical Google API `status` when no FCM detail is present.
    pub fn from_api_status(status: &str) -> Self {
        match status {
            "INVALID_ARGUMENT" => Self::InvalidArgument,
            "NOT_FOUND" => Self::Unregistered,
            "PERMISSION_DENIED" => Self::SenderIdMismatch,
            "RESOURCE_EXHAUSTED" => Self::QuotaExceeded,
            "UNAVAILABLE" => Self::Unavailable,
            "INTERNAL" => Self::Internal,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Unregistered => "UNREGISTERED",
            Self::SenderIdMismatch => "SENDER_ID_MISMATCH",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::Unavailable => "UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ThirdPartyAuthError => "THIRD_PARTY_AUTH_ERROR",
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for MessagingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcm_code_parsing() {
        assert_eq!(
            MessagingErrorCode::from_fcm_code("UNREGISTERED"),
            MessagingErrorCode::Unregistered
        );
        assert_eq!(
            MessagingErrorCode::from_fcm_code("QUOTA_EXCEEDED"),
            MessagingErrorCode::QuotaExceeded
        );
        assert_eq!(
            MessagingErrorCode::from_fcm_code("SOMETHING_NEW"),
            MessagingErrorCode::Unknown("SOMETHING_NEW".to_string())
        );
    }

    #[test]
    fn test_api_status_fallback() {
        assert_eq!(
            MessagingErrorCode::from_api_status("NOT_FOUND"),
            MessagingErrorCode::Unregistered
        );
        assert_eq!(
            MessagingErrorCode::from_api_status("RESOURCE_EXHAUSTED"),
            MessagingErrorCode::QuotaExceeded
        );
        assert_eq!(
            MessagingErrorCode::from_api_status("UNAUTHENTICATED").as_str(),
            "UNAUTHENTICATED"
        );
    }

    #[test]
    fn test_api_error_exposes_code() {
        let err = FcmError::Api {
            status: 404,
            code: MessagingErrorCode::Unregistered,
            message: "Requested entity was not found.".to_string(),
        };
        assert_eq!(err.code(), Some(&MessagingErrorCode::Unregistered));
        assert!(err.to_string().contains("UNREGISTERED"));

        let err = FcmError::TokenRequest {
            status: 400,
            body: "invalid_grant".to_string(),
        };
        assert!(err.code().is_none());
    }
}
