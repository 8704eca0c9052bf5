//! PKCE (Proof Key for Code Exchange) implementation for OAuth 2.0
//!
//! Implements the S256 method of RFC 7636. The verifier stays on the server
//! (persisted with the conversation); only the challenge travels to the
//! user's device inside the sign-in suggestion.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure code verifier
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43 characters).
/// Per RFC 7636, verifiers must be 43-128 characters long.
#[must_use]
pub fn generate_code_verifier() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Generate code challenge from verifier using SHA256
///
/// Per RFC 7636, the challenge is BASE64URL(SHA256(ASCII(code_verifier)))
/// without padding.
#[must_use]
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Verifier and challenge generated together for one sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PKCEChallenge {
    /// Random string (43 chars, base64url encoded); kept until token exchange
    pub code_verifier: String,

    /// SHA256 hash of `code_verifier` (base64url encoded)
    pub code_challenge: String,
}

impl PKCEChallenge {
    /// Generate a new verifier and derive its challenge
    ///
    /// # Examples
    /// ```
    /// use daybrief_common::auth::pkce::PKCEChallenge;
    ///
    /// let challenge = PKCEChallenge::generate();
    /// assert_eq!(challenge.code_verifier.len(), 43);
    /// ```
    #[must_use]
    pub fn generate() -> Self {
        Self::from_verifier(generate_code_verifier())
    }

    /// Derive the challenge for an existing verifier
    #[must_use]
    pub fn from_verifier(code_verifier: String) -> Self {
        let code_challenge = generate_code_challenge(&code_verifier);
        Self { code_verifier, code_challenge }
    }

    /// Get the challenge method (always "S256" for SHA256)
    #[must_use]
    pub const fn challenge_method(&self) -> &'static str {
        "S256"
    }
}
