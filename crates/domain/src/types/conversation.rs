use serde::{Deserialize, Serialize};

/// A Business Messages conversation known to the bot.
///
/// `code_verifier` is only meaningful between the login prompt and the next
/// authentication response for the same conversation. A new login overwrites
/// it; nothing clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub code_verifier: Option<String>,
}

impl Conversation {
    /// A conversation that has never started a login.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), code_verifier: None }
    }

    /// Copy of this conversation with the PKCE verifier replaced.
    #[must_use]
    pub fn with_code_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.code_verifier = Some(verifier.into());
        self
    }
}

/// Free-form feedback left for the bot operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub text: String,
    pub reviewed: bool,
}
