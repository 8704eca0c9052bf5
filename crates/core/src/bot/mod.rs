//! The chat bot: routing, sign-in and the day summary

pub mod login;
pub mod router;
pub mod service;
pub mod summary;

pub use router::{route, Route};
pub use service::{BotService, BotSettings, Outcome};
pub use summary::DaySummary;
