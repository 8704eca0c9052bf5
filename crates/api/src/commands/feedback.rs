//! Operator commands for the feedback queue

use daybrief_core::FeedbackRepository;
use daybrief_domain::{DaybriefError, Feedback, Result};
use tracing::info;

/// Store a new feedback entry.
///
/// # Errors
/// `InvalidInput` for blank text; storage errors otherwise.
pub async fn add_feedback(feedback: &dyn FeedbackRepository, text: &str) -> Result<Feedback> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DaybriefError::InvalidInput("feedback text is empty".into()));
    }

    let created = feedback.create(text).await?;
    info!(feedback_id = created.id, "feedback_added");
    Ok(created)
}

/// Feedback nobody has reviewed yet, oldest first.
pub async fn list_unreviewed_feedback(feedback: &dyn FeedbackRepository) -> Result<Vec<Feedback>> {
    feedback.list_unreviewed().await
}

/// Mark feedback `id` as reviewed.
///
/// # Errors
/// `NotFound` when no feedback has that id.
pub async fn review_feedback(feedback: &dyn FeedbackRepository, id: i64) -> Result<()> {
    feedback.mark_reviewed(id).await?;
    info!(feedback_id = id, "feedback_reviewed");
    Ok(())
}
