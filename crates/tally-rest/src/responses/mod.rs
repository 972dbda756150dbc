//! HTTP response envelopes and error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tally_core::{ErrorBody, TallyError};
use tally_service::{OverviewResponse, TransactionEntry, TypeSummary};
use utoipa::ToSchema;

/// Acknowledgement body for write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ack {
    /// Always `true`; failures never reach this shape.
    pub ok: bool,
}

impl Ack {
    #[must_use]
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Response body for `GET /transaction/list`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingBody {
    pub ok: bool,
    /// Matching entries, oldest first.
    pub data: Vec<TransactionEntry>,
}

impl ListingBody {
    #[must_use]
    pub const fn new(data: Vec<TransactionEntry>) -> Self {
        Self { ok: true, data }
    }
}

/// Response body for `GET /transaction/overview`.
///
/// Echoes the requested window as local display boundaries alongside the
/// per-category aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverviewBody {
    pub ok: bool,
    /// Window start rendered in local time, `YYYY-MM-DD HH:mm:ss`.
    pub start_at: String,
    /// Window end rendered in local time, `YYYY-MM-DD HH:mm:ss`.
    pub end_at: String,
    pub data: Vec<TypeSummary>,
}

impl From<OverviewResponse> for OverviewBody {
    fn from(overview: OverviewResponse) -> Self {
        Self {
            ok: true,
            start_at: overview.start_at,
            end_at: overview.end_at,
            data: overview.data,
        }
    }
}

/// Wrapper to make `TallyError` usable as an Axum rejection.
#[derive(Debug)]
pub struct AppError(pub TallyError);

impl<E> From<E> for AppError
where
    E: Into<TallyError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::BAD_REQUEST);
        tracing::debug!(code = self.0.error_code(), detail = %self.0, "request failed");
        (status, Json(ErrorBody::from_error(&self.0))).into_response()
    }
}

/// Result alias used by all controllers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Shorthand for the `{"ok":true}` acknowledgement.
#[must_use]
pub fn ack() -> Json<Ack> {
    Json(Ack::ok())
}
