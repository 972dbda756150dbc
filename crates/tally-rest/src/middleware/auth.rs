//! API key authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tally_core::TallyError;
use tracing::warn;

use crate::responses::AppError;

/// Header carrying the client API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// State for the API key middleware.
#[derive(Clone)]
pub struct ApiKeyState {
    api_key: Arc<str>,
}

impl ApiKeyState {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
        }
    }
}

/// Rejects requests whose `X-API-KEY` header does not match the configured
/// key. A missing header and a wrong key are indistinguishable to the client;
/// both yield `401 {"error":"Unauthorized"}`.
pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented != Some(state.api_key.as_ref()) {
        warn!(path = %request.uri().path(), "rejected request without a valid API key");
        return AppError(TallyError::Unauthorized).into_response();
    }

    next.run(request).await
}
