//! Operator command: push a message through the router for a conversation

use daybrief_core::Outcome;
use daybrief_domain::{DaybriefError, Result};
use tracing::info;

use crate::context::AppContext;

/// Route `message` for `conversation_id` exactly as if the user had typed it.
///
/// Unlike the webhook, the conversation must already exist.
///
/// # Errors
/// `NotFound` for an unknown conversation, otherwise whatever routing fails
/// with.
pub async fn send_message(
    context: &AppContext,
    conversation_id: &str,
    message: &str,
) -> Result<Outcome> {
    let conversation = context
        .conversations
        .get(conversation_id)
        .await?
        .ok_or_else(|| DaybriefError::NotFound(format!("conversation {conversation_id}")))?;

    let outcome = context.bot.route_message(message, &conversation).await?;
    info!(conversation_id, outcome = outcome.label(), "cli_message_routed");
    Ok(outcome)
}
