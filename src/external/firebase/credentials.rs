//! Service-account credential loading
//!
//! Accepts the JSON key file downloaded from the Firebase console
//! (Project settings > Service accounts).

use std::fmt;
use std::path::Path;

use jsonwebtoken::EncodingKey;
use serde::Deserialize;

use super::error::CredentialError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Parsed service-account key
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses and checks a key: type must be `service_account`, identity fields
    /// must be present, and the private key must be a usable RSA PEM.
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let key: Self = serde_json::from_str(json)?;

        if key.key_type != "service_account" {
            return Err(CredentialError::UnsupportedType(key.key_type));
        }
        for (field, value) in [
            ("project_id", &key.project_id),
            ("client_email", &key.client_email),
            ("private_key", &key.private_key),
            ("token_uri", &key.token_uri),
        ] {
            if value.trim().is_empty() {
                return Err(CredentialError::MissingField(field));
            }
        }
        key.encoding_key()?;

        Ok(key)
    }

    pub fn encoding_key(&self) -> Result<EncodingKey, CredentialError> {
        EncodingKey::from_rsa_pem(self.private_key.as_bytes()).map_err(CredentialError::InvalidKey)
    }
}

// Keeps the private key out of logs.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[REDACTED]")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIXTURE: &str = include_str!("../../../tests/fixtures/service-account.json");

    fn fixture_with(field: &str, value: serde_json::Value) -> String {
        let mut key: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        key[field] = value;
        key.to_string()
    }

    #[test]
    fn test_parses_fixture() {
        let key = ServiceAccountKey::from_json(FIXTURE).unwrap();
        assert_eq!(key.project_id, "notify-test");
        assert_eq!(key.client_email, "firebase-adminsdk@notify-test.iam.gserviceaccount.com");
    }

    #[test]
    fn test_token_uri_defaults_to_google() {
        let mut key: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        key.as_object_mut().unwrap().remove("token_uri");

        let key = ServiceAccountKey::from_json(&key.to_string()).unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_rejects_non_service_account() {
        let json = fixture_with("type", json!("authorized_user"));
        assert!(matches!(
            ServiceAccountKey::from_json(&json),
            Err(CredentialError::UnsupportedType(t)) if t == "authorized_user"
        ));
    }

    #[test]
    fn test_rejects_empty_client_email() {
        let json = fixture_with("client_email", json!(""));
        assert!(matches!(
            ServiceAccountKey::from_json(&json),
            Err(CredentialError::MissingField("client_email"))
        ));
    }

    #[test]
    fn test_rejects_garbage_private_key() {
        let json = fixture_with("private_key", json!("not a pem"));
        assert!(matches!(
            ServiceAccountKey::from_json(&json),
            Err(CredentialError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ServiceAccountKey::from_json("{ not json"),
            Err(CredentialError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ServiceAccountKey::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CredentialError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = ServiceAccountKey::from_json(FIXTURE).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("BEGIN PRIVATE KEY"));
    }
}
