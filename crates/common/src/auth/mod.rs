//! OAuth 2.0 + PKCE building blocks
//!
//! The bot never stores user tokens: it hands the user a PKCE challenge,
//! receives an authorization code back through the webhook and redeems it
//! once for a short-lived access token.
//!
//! # Module Organization
//!
//! - **[`pkce`]**: verifier and challenge generation (RFC 7636)
//! - **[`types`]**: token endpoint request and response shapes

pub mod pkce;
pub mod types;

pub use pkce::{generate_code_challenge, generate_code_verifier, PKCEChallenge};
pub use types::{AuthorizationCodeGrant, OAuthError, TokenResponse};
