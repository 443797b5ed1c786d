//! Inbound notification request

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A notification addressed to one recipient token.
///
/// Binding is lenient: absent or `null` text fields become empty strings and an
/// absent or `null` `data` becomes an empty map. Nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipient_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: HashMap<String, String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_request_binding() {
        let message: NotificationMessage = serde_json::from_value(json!({
            "recipientToken": "abc123",
            "title": "Hi",
            "body": "Hello",
            "imageUrl": "https://example.com/a.png",
            "data": { "k": "v" }
        }))
        .unwrap();

        assert_eq!(message.recipient_token, "abc123");
        assert_eq!(message.title, "Hi");
        assert_eq!(message.body, "Hello");
        assert_eq!(message.image_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(message.data.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_missing_fields_default() {
        let message: NotificationMessage = serde_json::from_value(json!({})).unwrap();
        assert_eq!(message, NotificationMessage::default());
    }

    #[test]
    fn test_null_fields_default() {
        let message: NotificationMessage = serde_json::from_value(json!({
            "recipientToken": null,
            "title": null,
            "body": "Hello",
            "imageUrl": null,
            "data": null
        }))
        .unwrap();

        assert_eq!(message.recipient_token, "");
        assert_eq!(message.title, "");
        assert_eq!(message.body, "Hello");
        assert!(message.image_url.is_none());
        assert!(message.data.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let message: NotificationMessage =
            serde_json::from_value(json!({ "recipientToken": "t", "priority": "high" })).unwrap();
        assert_eq!(message.recipient_token, "t");
    }

    #[test]
    fn test_non_string_data_value_is_rejected() {
        let result = serde_json::from_value::<NotificationMessage>(json!({
            "data": { "count": 3 }
        }));
        assert!(result.is_err());
    }
}
