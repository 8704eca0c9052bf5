//! Configuration loading
//!
//! Reads [`daybrief_domain::Config`] from environment variables and config
//! files.

pub mod loader;

pub use loader::{
    load, load_from_env, load_from_file, load_without_credentials, probe_config_paths,
};
