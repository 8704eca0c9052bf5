//! Domain types and models

pub mod calendar;
pub mod conversation;
pub mod message;
pub mod webhook;

pub use calendar::{CalendarEvent, DayWindow, EventStatus};
pub use conversation::{Conversation, Feedback};
pub use message::{OutboundMessage, Suggestion};
pub use webhook::{InboundEvent, InboundWebhook, UserStatus};
