//! Domain entities and value objects for Tally.
//!
//! This module contains the core business concepts: the transaction record,
//! its lifecycle, and the classification codes it carries.

pub mod codes;
pub mod transaction;

pub use codes::*;
pub use transaction::*;
