//! OAuth port interfaces

use async_trait::async_trait;
use daybrief_domain::TokenExchangeError;

/// Redeems an authorization code for a user access token (PKCE grant)
///
/// Client credentials and the token endpoint belong to the implementation.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange `code` for an access token.
    ///
    /// A response without `access_token` is
    /// [`TokenExchangeError::MissingAccessToken`].
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: Option<&str>,
    ) -> Result<String, TokenExchangeError>;
}
