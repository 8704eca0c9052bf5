//! Configuration structures
//!
//! Every section has serde defaults so a config file only needs to name the
//! values it changes. The OAuth client credentials have no sensible default
//! and are validated by the loader.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CALENDAR_API_BASE, DEFAULT_MESSAGING_API_BASE, DEFAULT_SERVICE_ACCOUNT_PATH,
    DEFAULT_TOKEN_ENDPOINT, DEFAULT_UTC_OFFSET, REPRESENTATIVE_AVATAR_URL,
    REPRESENTATIVE_DISPLAY_NAME,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub oauth: OAuthClientConfig,
    pub calendar: CalendarConfig,
    pub messaging: MessagingConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Webhook server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "0.0.0.0:8080".to_string() }
    }
}

/// SQLite settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "daybrief.db".to_string(), pool_size: 4 }
    }
}

/// OAuth client used for the user sign-in (PKCE) flow
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_endpoint: String,
}

impl Default for OAuthClientConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }
}

impl OAuthClientConfig {
    /// Both client credentials are set.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl std::fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}

/// Calendar API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub api_base: String,
    /// Fixed UTC offset appended to the day window bounds, e.g. `-07:00`.
    pub utc_offset: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_CALENDAR_API_BASE.to_string(),
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
        }
    }
}

/// Business Messages settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub api_base: String,
    pub service_account_path: String,
    pub representative_name: String,
    pub avatar_image: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_MESSAGING_API_BASE.to_string(),
            service_account_path: DEFAULT_SERVICE_ACCOUNT_PATH.to_string(),
            representative_name: REPRESENTATIVE_DISPLAY_NAME.to_string(),
            avatar_image: REPRESENTATIVE_AVATAR_URL.to_string(),
        }
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30, max_attempts: 1 }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

crate::impl_domain_status_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::Pretty, default_filter: "info".to_string() }
    }
}
