//! Transaction-related DTOs.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::rules;
use tally_core::{format_local, CategoryCode, CategoryTotal, CurrencyCode, KindCode, Transaction, TransactionId};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to record a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddTransactionRequest {
    /// Monetary amount; zero is accepted on creation.
    #[validate(custom(function = rules::non_negative_amount))]
    pub amount: Decimal,

    #[validate(length(min = 1, max = 32, message = "Title must be 1-32 characters"))]
    pub title: String,

    /// Category code, carried on the wire as `type`.
    #[serde(rename = "type")]
    pub category: CategoryCode,

    pub kind: KindCode,

    pub currency: CurrencyCode,

    #[validate(length(max = 255, message = "Remark cannot exceed 255 characters"))]
    pub remark: Option<String>,
}

/// Request to correct or soft-delete a recorded transaction.
///
/// With `is_delete` set the record is tombstoned and `amount` is ignored.
/// Otherwise `amount` is required and must be strictly positive; that check
/// lives in the service because it depends on the `is_delete` branch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionRequest {
    #[validate(range(min = 0, message = "ID must not be negative"))]
    pub id: i64,

    /// Replacement amount; required unless `is_delete` is set.
    pub amount: Option<Decimal>,

    /// When true, tombstones the record instead of correcting it.
    #[serde(default)]
    pub is_delete: bool,
}

/// Date-range query shared by the listing and overview endpoints.
///
/// Both bounds are inclusive calendar dates. The literal strings also key
/// the response cache, so equivalent spellings of the same range are
/// deliberately not normalized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
pub struct RangeQuery {
    /// First day of the range, `YYYY-MM-DD`.
    #[validate(custom(function = rules::strict_date))]
    pub start_at: String,

    /// Last day of the range, `YYYY-MM-DD`.
    #[validate(custom(function = rules::strict_date))]
    pub end_at: String,
}

/// A transaction as rendered in listings.
///
/// Field declaration order is the wire order. `date` is the creation
/// instant rendered in the configured local timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionEntry {
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub category: CategoryCode,
    pub date: String,
}

impl TransactionEntry {
    /// Projects a stored transaction into its listing form.
    #[must_use]
    pub fn project(transaction: &Transaction, offset: FixedOffset) -> Self {
        Self {
            id: transaction.id,
            title: transaction.title.clone(),
            amount: transaction.amount,
            category: transaction.category,
            date: format_local(transaction.created_at, offset),
        }
    }
}

/// Per-category totals as rendered in the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TypeSummary {
    #[serde(rename = "type")]
    pub category: CategoryCode,
    pub sum: Decimal,
    pub count: i64,
}

impl From<CategoryTotal> for TypeSummary {
    fn from(total: CategoryTotal) -> Self {
        Self {
            category: total.category,
            sum: total.sum,
            count: total.count,
        }
    }
}

/// Overview payload: local display boundaries plus per-category totals.
///
/// The boundaries are recomputed on every call so they stay present even
/// when the totals come out of the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverviewResponse {
    /// Window start, `YYYY-MM-DD 00:00:00` local.
    pub start_at: String,
    /// Window end, `YYYY-MM-DD 23:59:59` local.
    pub end_at: String,
    pub data: Vec<TypeSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tally_core::NewTransaction;
    use validator::Validate;

    fn utc8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn add_request() -> AddTransactionRequest {
        AddTransactionRequest {
            amount: Decimal::new(1250, 2),
            title: "coffee".to_string(),
            category: CategoryCode(1),
            kind: KindCode(2),
            currency: CurrencyCode(0),
            remark: None,
        }
    }

    fn stored_transaction() -> Transaction {
        let mut transaction = NewTransaction::new(
            Decimal::new(1250, 2),
            "coffee",
            CategoryCode(1),
            KindCode(2),
            CurrencyCode(0),
            None,
        )
        .into_transaction(TransactionId(1));
        transaction.created_at = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        transaction
    }

    #[test]
    fn test_add_request_valid() {
        assert!(add_request().validate().is_ok());
    }

    #[test]
    fn test_add_request_zero_amount_allowed() {
        let mut request = add_request();
        request.amount = Decimal::ZERO;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_request_negative_amount() {
        let mut request = add_request();
        request.amount = Decimal::new(-1, 2);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_add_request_empty_title() {
        let mut request = add_request();
        request.title = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_add_request_title_too_long() {
        let mut request = add_request();
        request.title = "x".repeat(33);
        assert!(request.validate().is_err());

        request.title = "x".repeat(32);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_request_wire_field_names() {
        let json = r#"{"amount":"12.50","title":"coffee","type":1,"kind":2,"currency":0}"#;
        let request: AddTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.category, CategoryCode(1));
        assert_eq!(request.amount, Decimal::new(1250, 2));
        assert!(request.remark.is_none());
    }

    #[test]
    fn test_add_request_accepts_numeric_amount() {
        let json = r#"{"amount":12.5,"title":"coffee","type":1,"kind":2,"currency":0}"#;
        let request: AddTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, Decimal::new(125, 1));
    }

    #[test]
    fn test_add_request_rejects_negative_type() {
        // Negative codes fail at deserialization, before validation runs.
        let json = r#"{"amount":"12.50","title":"coffee","type":-1,"kind":2,"currency":0}"#;
        assert!(serde_json::from_str::<AddTransactionRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_is_delete_defaults_false() {
        let request: UpdateTransactionRequest =
            serde_json::from_str(r#"{"id":1,"amount":"15.00"}"#).unwrap();
        assert!(!request.is_delete);
        assert_eq!(request.amount, Some(Decimal::new(1500, 2)));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_delete_without_amount() {
        let request: UpdateTransactionRequest =
            serde_json::from_str(r#"{"id":1,"is_delete":true}"#).unwrap();
        assert!(request.is_delete);
        assert!(request.amount.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_negative_id() {
        let request = UpdateTransactionRequest {
            id: -1,
            amount: Some(Decimal::ONE),
            is_delete: false,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_range_query_valid() {
        let query = RangeQuery {
            start_at: "2024-01-01".to_string(),
            end_at: "2024-01-31".to_string(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_range_query_rejects_loose_dates() {
        for (start_at, end_at) in [
            ("2024/01/01", "2024-01-31"),
            ("2024-1-1", "2024-01-31"),
            ("2024-01-01", "garbage"),
            ("", "2024-01-31"),
        ] {
            let query = RangeQuery {
                start_at: start_at.to_string(),
                end_at: end_at.to_string(),
            };
            assert!(query.validate().is_err(), "accepted {:?}", (start_at, end_at));
        }
    }

    #[test]
    fn test_transaction_entry_projection() {
        let entry = TransactionEntry::project(&stored_transaction(), utc8());

        assert_eq!(entry.id, TransactionId(1));
        assert_eq!(entry.date, "2024-01-10 18:00:00");

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"coffee","amount":"12.50","type":1,"date":"2024-01-10 18:00:00"}"#
        );
    }

    #[test]
    fn test_type_summary_wire_shape() {
        let summary = TypeSummary::from(CategoryTotal {
            category: CategoryCode(1),
            sum: Decimal::new(1250, 2),
            count: 2,
        });

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"type":1,"sum":"12.50","count":2}"#);
    }

    #[test]
    fn test_overview_response_round_trip() {
        let response = OverviewResponse {
            start_at: "2024-01-01 00:00:00".to_string(),
            end_at: "2024-01-31 23:59:59".to_string(),
            data: vec![TypeSummary {
                category: CategoryCode(1),
                sum: Decimal::new(1250, 2),
                count: 2,
            }],
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: OverviewResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }
}
