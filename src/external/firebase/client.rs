//! FCM HTTP v1 `messages:send` client

use std::time::Duration;

use super::auth::TokenSource;
use super::credentials::ServiceAccountKey;
use super::error::{FcmError, MessagingErrorCode};
use super::types::{ApiErrorResponse, Message, SendReceipt, SendRequest, SendResponse};
use crate::external::client::build_http_client;

pub const DEFAULT_API_BASE_URL: &str = "https://fcm.googleapis.com";

/// Connection settings for [`FcmClient`]
#[derive(Debug, Clone)]
pub struct FcmClientOptions {
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Ask FCM to validate messages without delivering them
    pub validate_only: bool,
}

impl Default for FcmClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            validate_only: false,
        }
    }
}

/// Sends messages for one Firebase project
pub struct FcmClient {
    project_id: String,
    send_url: String,
    validate_only: bool,
    http: reqwest::Client,
    tokens: TokenSource,
}

impl FcmClient {
    pub fn new(
        project_id: impl Into<String>,
        key: &ServiceAccountKey,
        options: FcmClientOptions,
    ) -> Result<Self, FcmError> {
        let project_id = project_id.into();
        let http = build_http_client(options.request_timeout).map_err(FcmError::Client)?;
        let tokens = TokenSource::new(key, http.clone())?;
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            options.api_base_url.trim_end_matches('/'),
            project_id
        );

        Ok(Self {
            project_id,
            send_url,
            validate_only: options.validate_only,
            http,
            tokens,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }

    /// Sends one message; no retries are attempted.
    pub async fn send(&self, message: &Message) -> Result<SendReceipt, FcmError> {
        let access_token = self.tokens.access_token().await?;
        let request = SendRequest {
            validate_only: self.validate_only,
            message,
        };

        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(|source| FcmError::Transport {
                endpoint: "messages:send",
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response.json().await.map_err(|source| FcmError::Decode {
                endpoint: "messages:send",
                source,
            })?;
            return Ok(SendReceipt {
                message_id: message_id_from_name(&body.name).to_string(),
            });
        }

        let text = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &text))
    }
}

/// `projects/p/messages/0:123` -> `0:123`
fn message_id_from_name(name: &str) -> &str {
    name.rsplit_once("/messages/")
        .map(|(_, id)| id)
        .unwrap_or(name)
}

fn api_error(status: u16, body: &str) -> FcmError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => FcmError::Api {
            status,
            code: parsed.error.messaging_code(),
            message: parsed.error.message,
        },
        Err(_) => FcmError::Api {
            status,
            code: MessagingErrorCode::Unknown(format!("HTTP_{status}")),
            message: body.to_string(),
        },
    }
}
