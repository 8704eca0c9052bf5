//! Messaging platform port interfaces

use async_trait::async_trait;
use daybrief_domain::{MessagingError, OutboundMessage};

/// Delivers bot messages to a conversation
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send `message` wrapped in typing-started / typing-stopped events.
    ///
    /// Event IDs derive from `message.message_id`, so retrying the same
    /// message does not create new typing events.
    async fn send_with_typing_indicator(
        &self,
        conversation_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessagingError>;
}
