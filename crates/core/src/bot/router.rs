//! Message router
//!
//! Chooses exactly one handler for an inbound text or postback.

use daybrief_domain::constants::{CMD_LOGIN, ECHO_PREFIX};
use daybrief_domain::OutboundMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Start the PKCE sign-in handshake.
    Login,
    /// Repeat the text back to the user.
    Echo,
}

/// Select the handler for `text`; only an exact case-insensitive `login`
/// starts a sign-in.
pub fn route(text: &str) -> Route {
    if text.to_lowercase() == CMD_LOGIN {
        Route::Login
    } else {
        Route::Echo
    }
}

/// Reply for [`Route::Echo`], carrying the text exactly as received.
pub fn echo_reply(text: &str) -> OutboundMessage {
    OutboundMessage::text(format!("{ECHO_PREFIX}{text}"))
}
