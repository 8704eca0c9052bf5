//! PKCE sign-in prompt

use daybrief_domain::constants::{
    LOGIN_PROMPT_TEXT, SCOPE_CALENDAR_READONLY, SCOPE_PROFILE, SUGGESTIONS_FALLBACK_TEXT,
};
use daybrief_domain::{OutboundMessage, Suggestion};

/// Scopes requested from the user when signing in.
pub fn requested_scopes() -> Vec<String> {
    vec![SCOPE_PROFILE.to_string(), SCOPE_CALENDAR_READONLY.to_string()]
}

/// Message carrying the authentication-request chip for `code_challenge`.
pub fn login_prompt(client_id: &str, code_challenge: &str) -> OutboundMessage {
    OutboundMessage::text(LOGIN_PROMPT_TEXT)
        .with_suggestion(Suggestion::AuthenticationRequest {
            client_id: client_id.to_string(),
            code_challenge: code_challenge.to_string(),
            scopes: requested_scopes(),
        })
        .with_fallback(SUGGESTIONS_FALLBACK_TEXT)
}
