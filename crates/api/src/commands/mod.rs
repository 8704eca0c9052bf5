//! Operator commands exposed through the `daybrief` CLI

pub mod feedback;
pub mod messaging;

pub use feedback::{add_feedback, list_unreviewed_feedback, review_feedback};
pub use messaging::send_message;
