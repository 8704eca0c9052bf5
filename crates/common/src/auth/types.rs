//! OAuth 2.0 token endpoint types
//!
//! Request and response shapes for the authorization-code grant with PKCE
//! (RFC 6749 §4.1.3, RFC 7636 §4.5).

use std::fmt;

use serde::Deserialize;

/// Form body for redeeming an authorization code
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationCodeGrant {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub code_verifier: String,
    /// Omitted from the form when the client did not report one.
    pub redirect_uri: Option<String>,
}

impl AuthorizationCodeGrant {
    /// Key/value pairs for an `application/x-www-form-urlencoded` body
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("client_secret", self.client_secret.as_str()),
            ("client_id", self.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", self.code.as_str()),
            ("code_verifier", self.code_verifier.as_str()),
        ];
        if let Some(redirect_uri) = &self.redirect_uri {
            fields.push(("redirect_uri", redirect_uri.as_str()));
        }
        fields
    }
}

impl fmt::Debug for AuthorizationCodeGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationCodeGrant")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("code_len", &self.code.len())
            .field("code_verifier_len", &self.code_verifier.len())
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// OAuth token response from authorization server
///
/// Every field is optional: Google answers some failures with a 200 and no
/// `access_token`, which callers must treat as a failed exchange.
#[derive(Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
}

impl TokenResponse {
    /// The access token, if present and non-empty.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("has_access_token", &self.access_token.is_some())
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// OAuth error response from authorization server
///
/// Standard OAuth 2.0 error response format (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
pub struct OAuthError {
    pub error: String,
    pub error_description: Option<String>,
}

impl OAuthError {
    /// Parse an error body, if it has the RFC 6749 shape.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthError {}
