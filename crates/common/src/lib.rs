//! Shared utilities for Daybrief crates.
//!
//! Currently this is the OAuth 2.0 sign-in plumbing that both the bot core
//! (challenge generation) and the infrastructure adapters (token exchange
//! wire format) depend on.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod auth;

pub use auth::{AuthorizationCodeGrant, OAuthError, PKCEChallenge, TokenResponse};
