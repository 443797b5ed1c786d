//! Authenticated Firebase app handle
//!
//! Built once at startup from the service-account file and then shared
//! read-only by every request.

use std::time::Duration;

use super::client::{FcmClient, FcmClientOptions};
use super::credentials::ServiceAccountKey;
use super::error::{CredentialError, FcmError};
use crate::config::FirebaseConfig;

/// Everything needed to initialize a [`FirebaseApp`]
#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    pub credentials: ServiceAccountKey,
    pub project_id: String,
    pub client: FcmClientOptions,
}

impl FirebaseOptions {
    /// Reads the credential file named in `config`.
    pub fn from_config(config: &FirebaseConfig) -> Result<Self, CredentialError> {
        let credentials = ServiceAccountKey::from_file(&config.credentials_path)?;
        let project_id = config
            .project_id
            .clone()
            .unwrap_or_else(|| credentials.project_id.clone());

        Ok(Self {
            credentials,
            project_id,
            client: FcmClientOptions {
                api_base_url: config.api_base_url.clone(),
                request_timeout: Duration::from_secs(config.request_timeout),
                validate_only: config.validate_only,
            },
        })
    }
}

pub struct FirebaseApp {
    name: String,
    messaging: FcmClient,
}

impl FirebaseApp {
    pub fn initialize(options: FirebaseOptions, name: impl Into<String>) -> Result<Self, FcmError> {
        let messaging = FcmClient::new(options.project_id, &options.credentials, options.client)?;
        Ok(Self {
            name: name.into(),
            messaging,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_id(&self) -> &str {
        self.messaging.project_id()
    }

    pub fn messaging(&self) -> &FcmClient {
        &self.messaging
    }
}
