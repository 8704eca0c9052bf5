//! Business Messages (agent-to-user messaging) adapter

pub mod auth;
pub mod gateway;
pub mod types;

pub use auth::{AccessTokenSource, ServiceAccountTokenSource, StaticTokenSource};
pub use gateway::BusinessMessagesGateway;
pub use types::Representative;
