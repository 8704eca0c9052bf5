//! # Daybrief Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite persistence for conversations and feedback
//! - The shared HTTP client and configuration loader
//! - Google integrations: OAuth token endpoint, Calendar API and the
//!   Business Messages API
//!
//! ## Architecture
//! - Implements traits defined in `daybrief-core`
//! - Contains all "impure" code (I/O, network, filesystem)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
