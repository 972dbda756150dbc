//! Transaction entity and lifecycle.

use super::codes::{CategoryCode, CurrencyCode, KindCode};
use crate::TransactionId;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits every stored amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// Normalizes a monetary amount to the storage scale.
///
/// Extra fractional digits round away from zero at the midpoint; shorter
/// amounts are padded, so `12.5` becomes `12.50`.
#[must_use]
pub fn normalize_amount(amount: Decimal) -> Decimal {
    let mut normalized =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    normalized.rescale(AMOUNT_SCALE);
    normalized
}

/// Lifecycle state of a transaction.
///
/// Soft deletion is an explicit two-state lifecycle; the `deleted_at`
/// timestamp is auxiliary metadata recording when the deleted state was
/// entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Live record, visible to listings and aggregates.
    Active,
    /// Tombstoned record, invisible to reads but retained in storage.
    Deleted,
}

impl TransactionState {
    /// Checks if this is the active state.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A recorded monetary transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the database.
    pub id: TransactionId,

    /// Monetary amount at the storage scale (two fractional digits).
    pub amount: Decimal,

    /// Short human-readable label, at most 32 characters.
    pub title: String,

    /// Category code (wire name `type`).
    pub category: CategoryCode,

    /// Sub-category code.
    pub kind: KindCode,

    /// Currency code.
    pub currency: CurrencyCode,

    /// Optional free-text note.
    pub remark: Option<String>,

    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,

    /// Tombstone timestamp; present iff the record is deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TransactionState {
        if self.deleted_at.is_some() {
            TransactionState::Deleted
        } else {
            TransactionState::Active
        }
    }

    /// Checks if the record is live.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Overwrites the amount, normalizing to the storage scale.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = normalize_amount(amount);
        self.updated_at = Utc::now();
    }

    /// Moves the record into the deleted state.
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// A transaction awaiting its database-assigned ID.
///
/// Construction stamps `created_at`/`updated_at` and normalizes the amount,
/// so everything reaching the repository is already in storage form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Monetary amount at the storage scale.
    pub amount: Decimal,

    /// Short human-readable label.
    pub title: String,

    /// Category code.
    pub category: CategoryCode,

    /// Sub-category code.
    pub kind: KindCode,

    /// Currency code.
    pub currency: CurrencyCode,

    /// Optional free-text note.
    pub remark: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp, equal to `created_at` on a fresh draft.
    pub updated_at: DateTime<Utc>,
}

impl NewTransaction {
    /// Creates a draft with server-assigned timestamps.
    #[must_use]
    pub fn new(
        amount: Decimal,
        title: impl Into<String>,
        category: CategoryCode,
        kind: KindCode,
        currency: CurrencyCode,
        remark: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            amount: normalize_amount(amount),
            title: title.into(),
            category,
            kind,
            currency,
            remark,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches the database-assigned ID, producing the persisted entity.
    #[must_use]
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            title: self.title,
            category: self.category,
            kind: self.kind,
            currency: self.currency,
            remark: self.remark,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: None,
        }
    }
}

/// Per-category aggregate over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category code the totals belong to.
    pub category: CategoryCode,

    /// Sum of amounts, at the storage scale.
    pub sum: Decimal,

    /// Number of aggregated records.
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: Decimal) -> NewTransaction {
        NewTransaction::new(
            amount,
            "coffee",
            CategoryCode(1),
            KindCode(2),
            CurrencyCode(0),
            None,
        )
    }

    #[test]
    fn test_normalize_amount_pads_and_rounds() {
        assert_eq!(normalize_amount(Decimal::new(125, 1)).to_string(), "12.50");
        assert_eq!(normalize_amount(Decimal::new(3, 0)).to_string(), "3.00");
        assert_eq!(normalize_amount(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(
            normalize_amount(Decimal::new(12505, 3)).to_string(),
            "12.51"
        );
        assert_eq!(
            normalize_amount(Decimal::new(12494, 3)).to_string(),
            "12.49"
        );
    }

    #[test]
    fn test_new_draft_stamps_timestamps() {
        let draft = draft(Decimal::new(125, 1));
        assert_eq!(draft.created_at, draft.updated_at);
        assert_eq!(draft.amount.to_string(), "12.50");
        assert_eq!(draft.title, "coffee");
    }

    #[test]
    fn test_into_transaction_attaches_id() {
        let txn = draft(Decimal::new(1250, 2)).into_transaction(TransactionId(7));
        assert_eq!(txn.id, TransactionId(7));
        assert_eq!(txn.amount.to_string(), "12.50");
        assert_eq!(txn.category, CategoryCode(1));
        assert!(txn.deleted_at.is_none());
        assert!(txn.is_active());
    }

    #[test]
    fn test_state_transitions() {
        let mut txn = draft(Decimal::ONE).into_transaction(TransactionId(1));
        assert_eq!(txn.state(), TransactionState::Active);

        txn.mark_deleted();
        assert_eq!(txn.state(), TransactionState::Deleted);
        assert!(!txn.is_active());
        assert!(txn.deleted_at.is_some());
        assert_eq!(txn.deleted_at, Some(txn.updated_at));
    }

    #[test]
    fn test_set_amount_normalizes_and_touches() {
        let mut txn = draft(Decimal::ONE).into_transaction(TransactionId(1));
        let before = txn.updated_at;
        txn.set_amount(Decimal::new(995, 1));
        assert_eq!(txn.amount.to_string(), "99.50");
        assert!(txn.updated_at >= before);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TransactionState::Active.to_string(), "active");
        assert_eq!(TransactionState::Deleted.to_string(), "deleted");
    }
}
