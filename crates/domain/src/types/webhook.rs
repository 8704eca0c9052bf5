//! Inbound Business Messages webhook payloads
//!
//! The payload is decoded once into an [`InboundEvent`]. Decoding is lenient:
//! a field with the wrong JSON type is treated as absent instead of failing
//! the whole request.

use serde_json::Value;

use crate::errors::WebhookError;

/// What the user did, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `message.text`
    TextMessage { text: String },
    /// `suggestionResponse.postbackData`
    SuggestionResponse { postback_data: String },
    /// `authenticationResponse`; either field may be missing.
    AuthResponse { code: Option<String>, redirect_uri: Option<String> },
    /// `userStatus`; informational only.
    UserStatus(UserStatus),
    /// Anything else (receipts, surveys, unknown shapes).
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Typing,
    RequestedLiveAgent,
    Other,
}

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundWebhook {
    pub conversation_id: String,
    pub display_name: Option<String>,
    pub event: InboundEvent,
}

impl InboundWebhook {
    /// Decode a raw request body.
    ///
    /// # Errors
    /// - [`WebhookError::InvalidJson`] when the body is not a JSON document
    /// - [`WebhookError::MissingConversationId`] when `conversationId` is
    ///   absent, empty or not a string
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| WebhookError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Decode an already-parsed JSON document.
    ///
    /// # Errors
    /// See [`InboundWebhook::parse`].
    pub fn from_value(value: &Value) -> Result<Self, WebhookError> {
        let conversation_id = str_at(value, "/conversationId")
            .filter(|id| !id.is_empty())
            .ok_or(WebhookError::MissingConversationId)?;

        Ok(Self {
            conversation_id,
            display_name: str_at(value, "/context/userInfo/displayName"),
            event: InboundEvent::from_value(value),
        })
    }
}

impl InboundEvent {
    fn from_value(value: &Value) -> Self {
        if let Some(text) = str_at(value, "/message/text") {
            return Self::TextMessage { text };
        }
        if let Some(postback_data) = str_at(value, "/suggestionResponse/postbackData") {
            return Self::SuggestionResponse { postback_data };
        }
        if value.get("authenticationResponse").is_some_and(Value::is_object) {
            return Self::AuthResponse {
                code: str_at(value, "/authenticationResponse/code"),
                redirect_uri: str_at(value, "/authenticationResponse/redirectUri"),
            };
        }
        if let Some(status) = value.get("userStatus").and_then(Value::as_object) {
            let status = if status.contains_key("isTyping") {
                UserStatus::Typing
            } else if status.contains_key("requestedLiveAgent") {
                UserStatus::RequestedLiveAgent
            } else {
                UserStatus::Other
            };
            return Self::UserStatus(status);
        }
        Self::Unknown
    }

    /// Short label for structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TextMessage { .. } => "text_message",
            Self::SuggestionResponse { .. } => "suggestion_response",
            Self::AuthResponse { .. } => "auth_response",
            Self::UserStatus(_) => "user_status",
            Self::Unknown => "unknown",
        }
    }
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: &Value) -> InboundWebhook {
        InboundWebhook::parse(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn text_message_is_decoded() {
        let hook = parse(&json!({
            "conversationId": "c1",
            "context": {"userInfo": {"displayName": "Ada"}},
            "message": {"text": "Hello"}
        }));

        assert_eq!(hook.conversation_id, "c1");
        assert_eq!(hook.display_name.as_deref(), Some("Ada"));
        assert_eq!(hook.event, InboundEvent::TextMessage { text: "Hello".into() });
    }

    #[test]
    fn message_text_wins_over_other_sections() {
        let hook = parse(&json!({
            "conversationId": "c1",
            "message": {"text": "login"},
            "suggestionResponse": {"postbackData": "other"},
            "authenticationResponse": {"code": "abc"}
        }));

        assert_eq!(hook.event.kind(), "text_message");
    }

    #[test]
    fn suggestion_response_beats_auth_response() {
        let hook = parse(&json!({
            "conversationId": "c1",
            "suggestionResponse": {"postbackData": "login"},
            "authenticationResponse": {"code": "abc"}
        }));

        assert_eq!(hook.event, InboundEvent::SuggestionResponse { postback_data: "login".into() });
    }

    #[test]
    fn auth_response_keeps_missing_fields_as_none() {
        let hook = parse(&json!({
            "conversationId": "c1",
            "authenticationResponse": {"redirectUri": "https://x"}
        }));

        assert_eq!(
            hook.event,
            InboundEvent::AuthResponse { code: None, redirect_uri: Some("https://x".into()) }
        );
    }

    #[test]
    fn user_status_variants() {
        let typing = parse(&json!({"conversationId": "c1", "userStatus": {"isTyping": true}}));
        let agent =
            parse(&json!({"conversationId": "c1", "userStatus": {"requestedLiveAgent": true}}));

        assert_eq!(typing.event, InboundEvent::UserStatus(UserStatus::Typing));
        assert_eq!(agent.event, InboundEvent::UserStatus(UserStatus::RequestedLiveAgent));
    }

    #[test]
    fn wrong_typed_fields_are_ignored() {
        let hook = parse(&json!({
            "conversationId": "c1",
            "context": "not-an-object",
            "message": {"text": 42}
        }));

        assert!(hook.display_name.is_none());
        assert_eq!(hook.event, InboundEvent::Unknown);
    }

    #[test]
    fn invalid_json_and_missing_id_are_errors() {
        assert!(matches!(InboundWebhook::parse(b"{nope"), Err(WebhookError::InvalidJson(_))));
        assert_eq!(
            InboundWebhook::parse(br#"{"message": {"text": "hi"}}"#),
            Err(WebhookError::MissingConversationId)
        );
        assert_eq!(
            InboundWebhook::parse(br#"{"conversationId": ""}"#),
            Err(WebhookError::MissingConversationId)
        );
    }
}
