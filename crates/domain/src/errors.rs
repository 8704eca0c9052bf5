//! Error types used throughout the application
//!
//! [`DaybriefError`] is the crate-wide error. The narrower enums describe the
//! failure modes of a single operation and convert into it, so adapters can
//! report precisely while the webhook handler only deals with one type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Daybrief
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DaybriefError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Daybrief operations
pub type Result<T> = std::result::Result<T, DaybriefError>;

/// Failures while exchanging an authorization code for an access token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenExchangeError {
    /// The token endpoint could not be reached.
    #[error("token request failed: {0}")]
    Request(String),

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to parse token response: {0}")]
    Parse(String),

    /// The response parsed but carried no `access_token`.
    #[error("token response did not contain an access_token: {body}")]
    MissingAccessToken { body: String },
}

/// Failures while listing calendar events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarFetchError {
    #[error("calendar request failed: {0}")]
    Request(String),

    #[error("calendar API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse calendar response: {0}")]
    Parse(String),
}

/// Failures while delivering a message or typing event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    /// No service-account token could be obtained.
    #[error("messaging credentials unavailable: {0}")]
    Auth(String),

    #[error("messaging request failed: {0}")]
    Request(String),

    #[error("messaging API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Reasons a single calendar event is skipped while building a summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventClassificationError {
    #[error("event has no start dateTime")]
    MissingStart,

    #[error("event has no summary")]
    MissingSummary,
}

/// Failures while decoding an inbound webhook body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("webhook body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("webhook body has no conversationId")]
    MissingConversationId,
}

impl From<TokenExchangeError> for DaybriefError {
    fn from(err: TokenExchangeError) -> Self {
        match err {
            TokenExchangeError::Request(_) => Self::Network(err.to_string()),
            TokenExchangeError::Endpoint { .. } | TokenExchangeError::MissingAccessToken { .. } => {
                Self::Auth(err.to_string())
            }
            TokenExchangeError::Parse(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

impl From<CalendarFetchError> for DaybriefError {
    fn from(err: CalendarFetchError) -> Self {
        match err {
            CalendarFetchError::Api { status: 401 | 403, .. } => Self::Auth(err.to_string()),
            CalendarFetchError::Request(_) | CalendarFetchError::Api { .. } => {
                Self::Network(err.to_string())
            }
            CalendarFetchError::Parse(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

impl From<MessagingError> for DaybriefError {
    fn from(err: MessagingError) -> Self {
        Self::Messaging(err.to_string())
    }
}

impl From<WebhookError> for DaybriefError {
    fn from(err: WebhookError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
