//! Port interfaces for conversation state and feedback
//!
//! These traits define the boundaries between the bot and whatever store
//! keeps the per-conversation PKCE verifier.

use async_trait::async_trait;
use daybrief_domain::{Conversation, Feedback, Result};

/// Trait for conversation persistence and retrieval
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Get a conversation by ID
    async fn get(&self, id: &str) -> Result<Option<Conversation>>;

    /// Insert or replace a conversation (last write wins)
    async fn upsert(&self, conversation: Conversation) -> Result<()>;

    /// Insert an empty conversation; a row that already exists is left as is
    async fn insert_if_absent(&self, id: &str) -> Result<()>;

    /// Get a conversation, creating an empty one when the ID is unknown
    ///
    /// Creation never overwrites a verifier stored by a concurrent event for
    /// the same conversation.
    async fn get_or_create(&self, id: &str) -> Result<Conversation> {
        if let Some(existing) = self.get(id).await? {
            return Ok(existing);
        }
        self.insert_if_absent(id).await?;
        Ok(self.get(id).await?.unwrap_or_else(|| Conversation::new(id)))
    }
}

/// Trait for operator feedback storage
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Store new feedback; returns the assigned ID
    async fn create(&self, text: &str) -> Result<Feedback>;

    /// Feedback nobody has reviewed yet, oldest first
    async fn list_unreviewed(&self) -> Result<Vec<Feedback>>;

    /// Mark feedback as reviewed; `NotFound` for an unknown ID
    async fn mark_reviewed(&self, id: i64) -> Result<()>;
}
