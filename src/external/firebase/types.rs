//! FCM HTTP v1 and Google OAuth2 wire types
//!
//! Message reference: <https://firebase.google.com/docs/reference/fcm/rest/v1/projects.messages>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::MessagingErrorCode;

/// Notification part of a message, rendered by the client OS or browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// URL of an image shown in the notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A message addressed to a single registration token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,
}

/// Request body for `messages:send`
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub validate_only: bool,
    pub message: &'a Message,
}

/// Successful `messages:send` response
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    /// `projects/{project_id}/messages/{message_id}`
    pub name: String,
}

/// Outcome of an accepted send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: String,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
}

impl ApiErrorBody {
    /// Prefers the FCM-specific `errorCode` detail over the canonical status.
    pub fn messaging_code(&self) -> MessagingErrorCode {
        self.details
            .iter()
            .filter(|detail| detail.type_url.ends_with("google.firebase.fcm.v1.FcmError"))
            .find_map(|detail| detail.error_code.as_deref())
            .map(MessagingErrorCode::from_fcm_code)
            .unwrap_or_else(|| MessagingErrorCode::from_api_status(&self.status))
    }
}

/// Claims of the self-signed JWT exchanged for an access token
#[derive(Debug, Serialize)]
pub struct JwtClaims<'a> {
    pub iss: &'a str,
    pub sub: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_message_omits_optional_parts() {
        let message = Message {
            token: "abc123".to_string(),
            notification: None,
            data: HashMap::new(),
        };
        let request = SendRequest {
            validate_only: false,
            message: &message,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "message": { "token": "abc123" } })
        );
    }

    #[test]
    fn test_full_message_shape() {
        let message = Message {
            token: "abc123".to_string(),
            notification: Some(Notification {
                title: Some("Hi".to_string()),
                body: Some("Hello".to_string()),
                image: Some("https://example.com/a.png".to_string()),
            }),
            data: HashMap::from([("k".to_string(), "v".to_string())]),
        };
        let request = SendRequest {
            validate_only: true,
            message: &message,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "validate_only": true,
                "message": {
                    "token": "abc123",
                    "notification": {
                        "title": "Hi",
                        "body": "Hello",
                        "image": "https://example.com/a.png"
                    },
                    "data": { "k": "v" }
                }
            })
        );
    }

    #[test]
    fn test_error_body_prefers_fcm_detail() {
        let body: ApiErrorResponse = serde_json::from_value(json!({
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND",
                "details": [
                    { "@type": "type.googleapis.com/google.rpc.BadRequest" },
                    {
                        "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                        "errorCode": "UNREGISTERED"
                    }
                ]
            }
        }))
        .unwrap();

        assert_eq!(body.error.messaging_code(), MessagingErrorCode::Unregistered);
    }

    #[test]
    fn test_error_body_falls_back_to_status() {
        let body: ApiErrorResponse = serde_json::from_value(json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        }))
        .unwrap();

        assert_eq!(body.error.messaging_code(), MessagingErrorCode::QuotaExceeded);
    }
}
