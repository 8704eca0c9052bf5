//! Outbound bot messages
//!
//! These are platform-neutral: the Business Messages adapter adds the
//! representative block and maps suggestions onto its wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chip attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// Suggested reply; tapping it sends `postback_data` back to the webhook.
    Reply { text: String, postback_data: String },
    /// OAuth sign-in request carrying the PKCE challenge.
    AuthenticationRequest { client_id: String, code_challenge: String, scopes: Vec<String> },
}

/// One message the bot sends to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Random 128-bit id rendered as a decimal integer.
    pub message_id: String,
    pub text: String,
    pub suggestions: Vec<Suggestion>,
    /// Shown by clients that cannot render suggestions.
    pub fallback: Option<String>,
}

impl OutboundMessage {
    /// Plain text message with a freshly generated id.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4().as_u128().to_string(),
            text: text.into(),
            suggestions: Vec::new(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// The code challenge of the first authentication request, if any.
    pub fn code_challenge(&self) -> Option<&str> {
        self.suggestions.iter().find_map(|s| match s {
            Suggestion::AuthenticationRequest { code_challenge, .. } => Some(code_challenge.as_str()),
            Suggestion::Reply { .. } => None,
        })
    }
}
