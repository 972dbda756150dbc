//! Transaction service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `transaction_service.rs`).

pub mod transaction_service_impl;

pub use transaction_service_impl::TransactionServiceImpl;
