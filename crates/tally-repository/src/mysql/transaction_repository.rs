//! MySQL transaction repository implementation.

use crate::{traits::TransactionRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::sync::Arc;
use tally_core::{
    CategoryCode, CategoryTotal, CurrencyCode, KindCode, NewTransaction, ReportingWindow,
    TallyResult, Transaction, TransactionId,
};
use tracing::debug;

/// MySQL transaction repository implementation.
#[derive(Clone)]
pub struct MySqlTransactionRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlTransactionRepository {
    /// Creates a new MySQL transaction repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a transaction.
///
/// The category column is named `type` for wire compatibility.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    amount: Decimal,
    title: String,
    #[sqlx(rename = "type")]
    category: u16,
    kind: u16,
    currency: u16,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: TransactionId::from_i64(row.id),
            amount: row.amount,
            title: row.title,
            category: CategoryCode(row.category),
            kind: KindCode(row.kind),
            currency: CurrencyCode(row.currency),
            remark: row.remark,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Database row representation of a per-category aggregate.
#[derive(Debug, FromRow)]
struct CategoryTotalRow {
    #[sqlx(rename = "type")]
    category: u16,
    sum: Decimal,
    count: i64,
}

impl From<CategoryTotalRow> for CategoryTotal {
    fn from(row: CategoryTotalRow) -> Self {
        CategoryTotal {
            category: CategoryCode(row.category),
            sum: row.sum,
            count: row.count,
        }
    }
}

#[async_trait]
impl TransactionRepository for MySqlTransactionRepository {
    async fn insert(&self, draft: &NewTransaction) -> TallyResult<TransactionId> {
        debug!("Inserting transaction: {}", draft.title);

        // MySQL doesn't support RETURNING, so insert then read the assigned ID
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (amount, title, `type`, kind, currency, remark,
                                      created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(draft.amount)
        .bind(&draft.title)
        .bind(draft.category.into_inner())
        .bind(draft.kind.into_inner())
        .bind(draft.currency.into_inner())
        .bind(&draft.remark)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(TransactionId::from_i64(result.last_insert_id() as i64))
    }

    async fn update_amount(&self, id: TransactionId, amount: Decimal) -> TallyResult<u64> {
        debug!("Updating amount for transaction {}", id);

        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, id: TransactionId) -> TallyResult<u64> {
        debug!("Soft deleting transaction {}", id);

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET deleted_at = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_in_window(&self, window: &ReportingWindow) -> TallyResult<Vec<Transaction>> {
        debug!(
            "Listing transactions in [{}, {})",
            window.start_utc(),
            window.end_utc_exclusive()
        );

        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, amount, title, `type`, kind, currency, remark,
                   created_at, updated_at, deleted_at
            FROM transactions
            WHERE deleted_at IS NULL
              AND created_at >= ?
              AND created_at < ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(window.start_utc())
        .bind(window.end_utc_exclusive())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn summarize_by_category(
        &self,
        window: &ReportingWindow,
    ) -> TallyResult<Vec<CategoryTotal>> {
        debug!(
            "Summarizing transactions in [{}, {})",
            window.start_utc(),
            window.end_utc_exclusive()
        );

        let rows = sqlx::query_as::<_, CategoryTotalRow>(
            r#"
            SELECT `type`, SUM(amount) AS sum, COUNT(amount) AS count
            FROM transactions
            WHERE deleted_at IS NULL
              AND created_at >= ?
              AND created_at < ?
            GROUP BY `type`
            ORDER BY `type` ASC
            "#,
        )
        .bind(window.start_utc())
        .bind(window.end_utc_exclusive())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(CategoryTotal::from).collect())
    }

    async fn find_by_id(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        debug!("Finding transaction by id: {}", id);

        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, amount, title, `type`, kind, currency, remark,
                   created_at, updated_at, deleted_at
            FROM transactions
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Transaction::from))
    }
}

impl std::fmt::Debug for MySqlTransactionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlTransactionRepository")
            .finish_non_exhaustive()
    }
}
