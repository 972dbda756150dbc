//! Transaction endpoints.
//!
//! Every route in this group sits behind the API key middleware; handlers can
//! assume the caller is already authenticated.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tally_core::ErrorBody;
use tally_service::{AddTransactionRequest, RangeQuery, UpdateTransactionRequest};
use tracing::debug;

use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::responses::{ack, Ack, ApiResult, ListingBody, OverviewBody};
use crate::state::AppState;

/// Builds the `/transaction` route group.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_transaction))
        .route("/update", post(update_transaction))
        .route("/list", get(list_transactions))
        .route("/overview", get(transaction_overview))
}

/// Records a new transaction.
#[utoipa::path(
    post,
    path = "/transaction/add",
    tag = "transaction",
    request_body = AddTransactionRequest,
    responses(
        (status = 200, description = "Transaction recorded", body = Ack),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn add_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AddTransactionRequest>,
) -> ApiResult<Ack> {
    debug!(amount = %request.amount, "REST add_transaction");
    let id = state.transaction_service.add_transaction(request).await?;
    debug!(id = %id, "transaction recorded");
    Ok(ack())
}

/// Corrects a transaction amount or soft-deletes the record.
///
/// `is_delete: true` tombstones the record and ignores any amount; otherwise
/// `amount` is required and replaces the stored value.
#[utoipa::path(
    post,
    path = "/transaction/update",
    tag = "transaction",
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Update applied", body = Ack),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateTransactionRequest>,
) -> ApiResult<Ack> {
    debug!(id = request.id, is_delete = request.is_delete, "REST update_transaction");
    state.transaction_service.update_transaction(request).await?;
    Ok(ack())
}

/// Lists active transactions inside a local-calendar date window.
#[utoipa::path(
    get,
    path = "/transaction/list",
    tag = "transaction",
    params(RangeQuery),
    responses(
        (status = 200, description = "Matching transactions, oldest first", body = ListingBody),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RangeQuery>,
) -> ApiResult<ListingBody> {
    debug!(start_at = %query.start_at, end_at = %query.end_at, "REST list_transactions");
    let entries = state.transaction_service.list_transactions(query).await?;
    Ok(Json(ListingBody::new(entries)))
}

/// Summarizes transactions per category inside a local-calendar date window.
#[utoipa::path(
    get,
    path = "/transaction/overview",
    tag = "transaction",
    params(RangeQuery),
    responses(
        (status = 200, description = "Per-category totals", body = OverviewBody),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn transaction_overview(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RangeQuery>,
) -> ApiResult<OverviewBody> {
    debug!(start_at = %query.start_at, end_at = %query.end_at, "REST transaction_overview");
    let overview = state.transaction_service.overview(query).await?;
    Ok(Json(OverviewBody::from(overview)))
}
