//! Validation utilities.

use crate::TallyError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `TallyError` on failure.
    fn validate_request(&self) -> Result<(), TallyError> {
        self.validate().map_err(validation_errors_to_tally_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `TallyError`.
///
/// Field details are rendered as `field: message` and joined with `; `;
/// the order is sorted so the detail string is stable across runs.
#[must_use]
pub fn validation_errors_to_tally_error(errors: ValidationErrors) -> TallyError {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                // Struct-level errors carry the synthetic "__all__" key.
                if AsRef::<str>::as_ref(field) == "__all__" {
                    message
                } else {
                    format!("{}: {}", field, message)
                }
            })
        })
        .collect();
    details.sort();

    TallyError::Validation(details.join("; "))
}

/// Common validation functions.
pub mod rules {
    use crate::window::parse_calendar_date;
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates a strict `YYYY-MM-DD` calendar date string.
    pub fn strict_date(value: &str) -> Result<(), ValidationError> {
        if parse_calendar_date(value).is_err() {
            let mut err = ValidationError::new("invalid_date");
            err.message = Some("must be a calendar date in YYYY-MM-DD format".into());
            return Err(err);
        }
        Ok(())
    }

    /// Validates that an amount is zero or greater.
    pub fn non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
        if *amount < Decimal::ZERO {
            let mut err = ValidationError::new("negative_amount");
            err.message = Some("must not be negative".into());
            return Err(err);
        }
        Ok(())
    }

    /// Validates that an amount is strictly greater than zero.
    pub fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
        if *amount <= Decimal::ZERO {
            let mut err = ValidationError::new("non_positive_amount");
            err.message = Some("must be greater than zero".into());
            return Err(err);
        }
        Ok(())
    }
}
