//! Bearer tokens for the Business Messages API
//!
//! The agent authenticates as a service account; the token source is a trait
//! so tests can hand the gateway a fixed token.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use daybrief_domain::constants::SCOPE_BUSINESS_MESSAGES;
use daybrief_domain::MessagingError;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::info;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::hyper_rustls::HttpsConnector;
use yup_oauth2::ServiceAccountAuthenticator;

/// Source of bearer tokens for outbound messaging calls
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, MessagingError>;
}

/// Service-account credentials with the Business Messages scope.
///
/// yup-oauth2 caches the token and refreshes it shortly before expiry.
#[derive(Clone)]
pub struct ServiceAccountTokenSource {
    auth: Arc<Authenticator<HttpsConnector<HttpConnector>>>,
}

impl ServiceAccountTokenSource {
    /// Load the service-account key file at `path`.
    ///
    /// # Errors
    /// `MessagingError::Auth` when the file is missing or not a key.
    pub async fn from_key_file(path: impl AsRef<Path>) -> Result<Self, MessagingError> {
        let path = path.as_ref();
        let key = yup_oauth2::read_service_account_key(path).await.map_err(|e| {
            MessagingError::Auth(format!(
                "failed to read service account key {}: {e}",
                path.display()
            ))
        })?;
        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| MessagingError::Auth(format!("failed to create authenticator: {e}")))?;

        info!(key_path = %path.display(), "service_account_loaded");
        Ok(Self { auth: Arc::new(auth) })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, MessagingError> {
        let token = self
            .auth
            .token(&[SCOPE_BUSINESS_MESSAGES])
            .await
            .map_err(|e| MessagingError::Auth(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| MessagingError::Auth("service account token has no value".into()))
    }
}

/// Fixed token, for tests and local tooling.
#[derive(Debug, Clone)]
pub struct StaticTokenSource(pub String);

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, MessagingError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_file_is_an_auth_error() {
        let result = ServiceAccountTokenSource::from_key_file("/nonexistent/key.json").await;
        assert!(matches!(result, Err(MessagingError::Auth(msg)) if msg.contains("/nonexistent/key.json")));
    }

    #[tokio::test]
    async fn malformed_key_file_is_an_auth_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, r#"{"type": "authorized_user"}"#).unwrap();

        let result = ServiceAccountTokenSource::from_key_file(&path).await;
        assert!(matches!(result, Err(MessagingError::Auth(_))));
    }

    #[tokio::test]
    async fn static_source_returns_its_token() {
        let source = StaticTokenSource("ya29.static".into());
        assert_eq!(source.access_token().await.unwrap(), "ya29.static");
    }
}
