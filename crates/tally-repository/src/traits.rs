//! Repository trait definitions.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_core::{
    CategoryTotal, NewTransaction, ReportingWindow, TallyResult, Transaction, TransactionId,
};

/// Transaction repository trait.
///
/// Mutations report the number of rows affected rather than erroring on
/// absent or already-deleted records; callers decide what zero means.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts a draft and returns the database-assigned ID.
    async fn insert(&self, draft: &NewTransaction) -> TallyResult<TransactionId>;

    /// Overwrites the amount of an active record, touching `updated_at`.
    async fn update_amount(&self, id: TransactionId, amount: Decimal) -> TallyResult<u64>;

    /// Moves an active record into the deleted state.
    async fn soft_delete(&self, id: TransactionId) -> TallyResult<u64>;

    /// Lists active records created inside the window, oldest first.
    async fn list_in_window(&self, window: &ReportingWindow) -> TallyResult<Vec<Transaction>>;

    /// Aggregates active records inside the window per category code.
    async fn summarize_by_category(
        &self,
        window: &ReportingWindow,
    ) -> TallyResult<Vec<CategoryTotal>>;

    /// Finds a record by ID, tombstoned records included.
    async fn find_by_id(&self, id: TransactionId) -> TallyResult<Option<Transaction>>;
}
