//! Result type aliases for Tally.

use crate::TallyError;

/// A specialized `Result` type for Tally operations.
pub type TallyResult<T> = Result<T, TallyError>;
