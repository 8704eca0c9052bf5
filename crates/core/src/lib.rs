//! # Daybrief Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, OAuth, calendar and
//!   messaging
//! - The bot: message routing, the PKCE login handshake and the day summary
//!
//! ## Architecture Principles
//! - Only depends on `daybrief-common` and `daybrief-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod bot;
pub mod clock;

// Infrastructure ports
pub mod auth_ports;
pub mod calendar_ports;
pub mod conversation_ports;
pub mod messaging_ports;

pub use auth_ports::TokenExchanger;
pub use bot::{BotService, BotSettings, Outcome, Route};
pub use calendar_ports::CalendarProvider;
pub use clock::{Clock, SystemClock};
pub use conversation_ports::{ConversationRepository, FeedbackRepository};
pub use messaging_ports::MessagingGateway;
