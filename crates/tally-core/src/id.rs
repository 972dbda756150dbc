//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;

/// A strongly-typed wrapper for transaction IDs.
///
/// IDs are assigned by the database on insert (auto-increment); client input
/// is validated to be non-negative before it reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TransactionId(pub i64);

impl TransactionId {
    /// Creates a transaction ID from a raw integer.
    #[must_use]
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Parses a transaction ID from a string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.parse()?))
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TransactionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TransactionId> for i64 {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}
