//! Classification codes carried by every transaction.
//!
//! Codes are small non-negative integers whose meaning is owned by the
//! client; the service stores them and groups by them without interpreting
//! them. The unsigned representation is what makes negative input a
//! deserialization failure rather than a storage concern.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Category code (wire name `type`), e.g. income vs expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryCode(pub u16);

impl CategoryCode {
    /// Returns the raw code.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }
}

impl Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for CategoryCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Sub-category code (wire name `kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct KindCode(pub u16);

impl KindCode {
    /// Returns the raw code.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }
}

impl Display for KindCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for KindCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CurrencyCode(pub u16);

impl CurrencyCode {
    /// Returns the raw code.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for CurrencyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}
