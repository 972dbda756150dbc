//! # Tally Service
//!
//! Business logic layer for Tally. Validates requests, resolves reporting
//! windows, and coordinates the transaction repository with the report
//! cache.

pub mod cache;
pub mod dto;
pub mod transaction_service;

mod r#impl;

pub use cache::*;
pub use dto::*;
pub use r#impl::TransactionServiceImpl;
pub use transaction_service::*;
