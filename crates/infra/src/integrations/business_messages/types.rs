//! Business Messages wire format (v1, camelCase JSON)

use daybrief_domain::constants::REPRESENTATIVE_TYPE_BOT;
use daybrief_domain::{OutboundMessage, Suggestion};
use serde::Serialize;

/// Who the user sees as the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub representative_type: &'static str,
    pub display_name: String,
    pub avatar_image: String,
}

impl Representative {
    pub fn bot(display_name: impl Into<String>, avatar_image: impl Into<String>) -> Self {
        Self {
            representative_type: REPRESENTATIVE_TYPE_BOT,
            display_name: display_name.into(),
            avatar_image: avatar_image.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypingEvent {
    TypingStarted,
    TypingStopped,
}

impl TypingEvent {
    /// Suffix appended to the message id to form this event's id.
    pub const fn id_suffix(self) -> char {
        match self {
            Self::TypingStarted => '1',
            Self::TypingStopped => '2',
        }
    }
}

/// Body of `conversations/{id}/events`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest<'a> {
    pub event_type: TypingEvent,
    pub representative: &'a Representative,
}

/// Body of `conversations/{id}/messages`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest<'a> {
    pub message_id: &'a str,
    pub representative: &'a Representative,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<SuggestionPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<&'a str>,
}

impl<'a> MessageRequest<'a> {
    pub fn new(message: &'a OutboundMessage, representative: &'a Representative) -> Self {
        Self {
            message_id: &message.message_id,
            representative,
            text: &message.text,
            suggestions: message.suggestions.iter().map(SuggestionPayload::from).collect(),
            fallback: message.fallback.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionPayload<'a> {
    Reply {
        text: &'a str,
        #[serde(rename = "postbackData")]
        postback_data: &'a str,
    },
    AuthenticationRequest { oauth: OAuthRequest<'a> },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthRequest<'a> {
    pub client_id: &'a str,
    pub code_challenge: &'a str,
    pub scopes: &'a [String],
}

impl<'a> From<&'a Suggestion> for SuggestionPayload<'a> {
    fn from(suggestion: &'a Suggestion) -> Self {
        match suggestion {
            Suggestion::Reply { text, postback_data } => Self::Reply { text, postback_data },
            Suggestion::AuthenticationRequest { client_id, code_challenge, scopes } => {
                Self::AuthenticationRequest {
                    oauth: OAuthRequest { client_id, code_challenge, scopes },
                }
            }
        }
    }
}
