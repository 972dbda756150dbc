//! Application state for Axum handlers.

use std::sync::Arc;
use tally_service::TransactionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: Arc<dyn TransactionService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(transaction_service: Arc<dyn TransactionService>) -> Self {
        Self {
            transaction_service,
        }
    }
}
