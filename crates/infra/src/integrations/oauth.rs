//! Authorization-code redemption against the Google token endpoint

use async_trait::async_trait;
use daybrief_common::auth::{AuthorizationCodeGrant, OAuthError, TokenResponse};
use daybrief_core::TokenExchanger;
use daybrief_domain::{OAuthClientConfig, TokenExchangeError};
use reqwest::Method;
use tracing::{info, warn};

use crate::http::HttpClient;

/// Redeems PKCE authorization codes for access tokens.
pub struct GoogleTokenClient {
    http: HttpClient,
    client_id: String,
    client_secret: String,
    token_endpoint: String,
}

impl GoogleTokenClient {
    pub fn new(http: HttpClient, config: &OAuthClientConfig) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_endpoint: config.token_endpoint.clone(),
        }
    }
}

#[async_trait]
impl TokenExchanger for GoogleTokenClient {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: Option<&str>,
    ) -> Result<String, TokenExchangeError> {
        let grant = AuthorizationCodeGrant {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            code: code.to_string(),
            code_verifier: code_verifier.to_string(),
            redirect_uri: redirect_uri.map(str::to_string),
        };

        let request =
            self.http.request(Method::POST, &self.token_endpoint).form(&grant.form_fields());
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| TokenExchangeError::Request(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TokenExchangeError::Request(e.to_string()))?;

        if !status.is_success() {
            match OAuthError::from_body(&body) {
                Some(oauth) => warn!(status = status.as_u16(), error = %oauth, "token_exchange_rejected"),
                None => warn!(status = status.as_u16(), "token_exchange_rejected"),
            }
            return Err(TokenExchangeError::Endpoint { status: status.as_u16(), body });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| TokenExchangeError::Parse(e.to_string()))?;

        let access_token = token
            .access_token()
            .map(str::to_string)
            // Debug output of TokenResponse carries no token values.
            .ok_or_else(|| TokenExchangeError::MissingAccessToken { body: format!("{token:?}") })?;

        info!(
            token_type = token.token_type.as_deref().unwrap_or(""),
            expires_in = token.expires_in,
            "token_exchange_succeeded"
        );
        Ok(access_token)
    }
}
