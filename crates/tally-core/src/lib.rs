//! # Tally Core
//!
//! Core types, domain entities, and error definitions for Tally.
//! This crate provides the foundational abstractions used across all layers:
//! the unified error type, typed identifiers, validation bridging, and the
//! calendar-window arithmetic behind every range query.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;
pub mod window;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
pub use window::*;
