//! # Daybrief App
//!
//! Application layer - webhook server, operator commands and entry point.
//!
//! This crate contains:
//! - The axum router serving the Business Messages webhook
//! - Application context (dependency injection)
//! - Operator commands behind the `daybrief` CLI
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod server;
pub mod utils;

pub use context::*;
pub use server::router;
