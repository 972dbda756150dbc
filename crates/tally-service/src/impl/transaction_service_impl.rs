//! Transaction service implementation.

use crate::cache::{cache_keys, Cache, CacheExt, DEFAULT_TTL};
use crate::dto::{
    AddTransactionRequest, OverviewResponse, RangeQuery, TransactionEntry, TypeSummary,
    UpdateTransactionRequest,
};
use crate::transaction_service::TransactionService;
use async_trait::async_trait;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use std::sync::Arc;
use tally_core::{
    normalize_amount, NewTransaction, ReportingWindow, TallyError, TallyResult, TransactionId,
    ValidateExt,
};
use tally_repository::TransactionRepository;
use tracing::{debug, info, warn};

/// Transaction service backed by a repository and a report cache.
///
/// The cache holds fully-shaped response payloads keyed by the literal query
/// strings; every write drops the whole namespace rather than chasing
/// individual keys.
pub struct TransactionServiceImpl {
    repository: Arc<dyn TransactionRepository>,
    cache: Arc<dyn Cache>,
    offset: FixedOffset,
}

impl TransactionServiceImpl {
    /// Creates a new transaction service.
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        cache: Arc<dyn Cache>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            repository,
            cache,
            offset,
        }
    }

    fn window_for(&self, query: &RangeQuery) -> TallyResult<ReportingWindow> {
        ReportingWindow::resolve(&query.start_at, &query.end_at, self.offset)
    }

    /// Drops every cached report after a write.
    ///
    /// Flush failures are logged and swallowed: the write already landed, and
    /// staleness is bounded by the TTL.
    async fn invalidate_reports(&self) {
        match self
            .cache
            .delete_pattern(&cache_keys::invalidation_pattern())
            .await
        {
            Ok(dropped) if dropped > 0 => debug!("Flushed {} cached reports", dropped),
            Ok(_) => {}
            Err(e) => warn!("Failed to flush report cache: {}", e),
        }
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn add_transaction(&self, request: AddTransactionRequest) -> TallyResult<TransactionId> {
        debug!("Recording transaction: {}", request.title);

        request.validate_request()?;

        let draft = NewTransaction::new(
            request.amount,
            request.title,
            request.category,
            request.kind,
            request.currency,
            request.remark,
        );

        let id = self.repository.insert(&draft).await?;
        self.invalidate_reports().await;

        info!("Transaction recorded: {}", id);
        Ok(id)
    }

    async fn update_transaction(&self, request: UpdateTransactionRequest) -> TallyResult<()> {
        debug!(
            "Updating transaction {} (is_delete: {})",
            request.id, request.is_delete
        );

        request.validate_request()?;
        let id = TransactionId::from_i64(request.id);

        let affected = if request.is_delete {
            self.repository.soft_delete(id).await?
        } else {
            let amount = request.amount.ok_or_else(|| {
                TallyError::validation("amount: required unless is_delete is set")
            })?;
            if amount <= Decimal::ZERO {
                return Err(TallyError::validation("amount: must be greater than zero"));
            }
            self.repository
                .update_amount(id, normalize_amount(amount))
                .await?
        };

        // Mutating a missing or already-deleted record is a silent no-op.
        if affected == 0 {
            debug!("Transaction {} matched no active record", id);
        }

        self.invalidate_reports().await;

        info!("Transaction updated: {}", id);
        Ok(())
    }

    async fn list_transactions(&self, query: RangeQuery) -> TallyResult<Vec<TransactionEntry>> {
        debug!("Listing transactions: {} to {}", query.start_at, query.end_at);

        query.validate_request()?;

        let key = cache_keys::list_window(&query.start_at, &query.end_at);
        if let Some(cached) = self.cache.get::<Vec<TransactionEntry>>(&key).await? {
            debug!("Returning cached listing for '{}'", key);
            return Ok(cached);
        }

        let window = self.window_for(&query)?;
        let transactions = self.repository.list_in_window(&window).await?;
        let entries: Vec<TransactionEntry> = transactions
            .iter()
            .map(|transaction| TransactionEntry::project(transaction, self.offset))
            .collect();

        // Empty listings are not cached; the next call re-reads the database.
        if !entries.is_empty() {
            if let Err(e) = self.cache.set(&key, &entries, DEFAULT_TTL).await {
                warn!("Failed to cache listing for '{}': {}", key, e);
            }
        }

        Ok(entries)
    }

    async fn overview(&self, query: RangeQuery) -> TallyResult<OverviewResponse> {
        debug!("Overview: {} to {}", query.start_at, query.end_at);

        query.validate_request()?;

        // Display boundaries are recomputed on every call, cache hits included.
        let window = self.window_for(&query)?;
        let key = cache_keys::overview_window(&query.start_at, &query.end_at);

        let data = match self.cache.get::<Vec<TypeSummary>>(&key).await? {
            Some(cached) => {
                debug!("Returning cached overview for '{}'", key);
                cached
            }
            None => {
                let totals = self.repository.summarize_by_category(&window).await?;
                let summaries: Vec<TypeSummary> =
                    totals.into_iter().map(TypeSummary::from).collect();

                if let Err(e) = self.cache.set(&key, &summaries, DEFAULT_TTL).await {
                    warn!("Failed to cache overview for '{}': {}", key, e);
                }

                summaries
            }
        };

        Ok(OverviewResponse {
            start_at: window.display_start(),
            end_at: window.display_end(),
            data,
        })
    }
}

impl std::fmt::Debug for TransactionServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionServiceImpl").finish_non_exhaustive()
    }
}
