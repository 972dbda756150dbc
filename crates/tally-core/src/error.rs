//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Tally.
///
/// The HTTP contract is deliberately flat: an authentication failure maps to
/// 401 and every other failure maps to 400 with the detail carried in the
/// body. Clients distinguish failure classes by the detail string, not the
/// status code.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unauthorized access. Displays as the literal body detail.
    #[error("Unauthorized")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TallyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Validation(_)
            | Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 400,
        }
    }

    /// Returns a machine-readable error code, used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TallyError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response body.
///
/// Every failed request carries this single-field shape, regardless of the
/// failure class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    /// Human-readable error detail
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body from a `TallyError`.
    #[must_use]
    pub fn from_error(error: &TallyError) -> Self {
        Self {
            error: error.to_string(),
        }
    }

    /// Creates an error body from a raw detail string.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            error: detail.into(),
        }
    }
}

impl From<&TallyError> for ErrorBody {
    fn from(error: &TallyError) -> Self {
        Self::from_error(error)
    }
}
