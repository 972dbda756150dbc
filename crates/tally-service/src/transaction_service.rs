//! Transaction service trait definition.

use crate::dto::{
    AddTransactionRequest, OverviewResponse, RangeQuery, TransactionEntry,
    UpdateTransactionRequest,
};
use async_trait::async_trait;
use tally_core::{TallyResult, TransactionId};

/// Transaction service trait.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Records a new transaction and returns its assigned ID.
    async fn add_transaction(&self, request: AddTransactionRequest) -> TallyResult<TransactionId>;

    /// Corrects a transaction's amount, or tombstones it when `is_delete`
    /// is set.
    async fn update_transaction(&self, request: UpdateTransactionRequest) -> TallyResult<()>;

    /// Lists active transactions in a date range, oldest first.
    async fn list_transactions(&self, query: RangeQuery) -> TallyResult<Vec<TransactionEntry>>;

    /// Summarizes active transactions in a date range, grouped by category.
    async fn overview(&self, query: RangeQuery) -> TallyResult<OverviewResponse>;
}
