//! Database implementations

pub mod conversation_repository;
pub mod feedback_repository;
pub mod manager;

pub use conversation_repository::*;
pub use feedback_repository::*;
pub use manager::{DbConnection, DbManager};
