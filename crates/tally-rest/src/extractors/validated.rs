//! Extractors that enforce validation before a handler runs.
//!
//! Axum's stock `Json` and `Query` rejections are plain text; wrapping them
//! keeps malformed input on the same `{"error": ...}` shape as every other
//! failure.

use axum::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tally_core::{validation_errors_to_tally_error, TallyError};
use validator::Validate;

use crate::responses::AppError;

/// JSON body extractor that deserializes and validates in one step.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                TallyError::validation(format!("Invalid JSON: {}", rejection.body_text()))
            })?;
        value.validate().map_err(validation_errors_to_tally_error)?;
        Ok(Self(value))
    }
}

/// Query string extractor with the same contract as [`ValidatedJson`].
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                TallyError::validation(format!("Invalid query: {}", rejection.body_text()))
            })?;
        value.validate().map_err(validation_errors_to_tally_error)?;
        Ok(Self(value))
    }
}
