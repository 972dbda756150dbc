//! # Tally Config
//!
//! Configuration management for Tally.
//! Supports layered configuration from files and environment variables,
//! with fail-fast validation at load time.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
