//! # Daybrief Domain
//!
//! Business domain types and models for Daybrief.
//!
//! This crate contains:
//! - Conversation and feedback records
//! - Inbound webhook events and outbound bot messages
//! - Calendar event items consumed by the day summary
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (bot commands and copy)
//!
//! ## Architecture
//! - No dependencies on other Daybrief crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
