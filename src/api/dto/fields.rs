//! Field-level checks shared by the request DTOs.
//!
//! Request fields deserialize as `Option<Option<T>>` so an absent key
//! (`None`) is told apart from an explicit `null` (`Some(None)`). The
//! helpers here turn those into plain values while collecting every field
//! message into one [`ValidationErrors`], so a client sees all problems at
//! once.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::utils::decimal::DecimalPrecision;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";

/// Adds a message to `field`.
pub fn add(errors: &mut ValidationErrors, field: &'static str, message: impl Into<Cow<'static, str>>) {
    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());
    errors.add(field, error);
}

/// Value of a field that must be present and non-null.
pub fn required<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Option<T>>,
) -> Option<T> {
    match value {
        None => {
            add(errors, field, REQUIRED);
            None
        }
        Some(None) => {
            add(errors, field, NULL);
            None
        }
        Some(value) => value,
    }
}

/// Value of an optional field that may not be `null` when supplied.
pub fn non_null<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Option<T>>,
) -> Option<T> {
    if matches!(value, Some(None)) {
        add(errors, field, NULL);
    }
    value.flatten()
}

/// The supplied string, if any.
pub fn text(value: &Option<Option<String>>) -> Option<&str> {
    value.as_ref().and_then(Option::as_deref)
}

/// Length limit and, unless `allow_blank`, the non-blank rule.
pub fn check_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max_length: usize,
    allow_blank: bool,
) {
    let Some(value) = value else { return };

    if value.is_empty() && !allow_blank {
        add(errors, field, BLANK);
    } else if value.chars().count() > max_length {
        add(
            errors,
            field,
            format!("Ensure this field has no more than {max_length} characters."),
        );
    }
}

/// Checks a supplied decimal against its column precision.
pub fn check_decimal(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&Decimal>,
    precision: DecimalPrecision,
) {
    if let Some(value) = value
        && let Err(message) = precision.check(value)
    {
        add(errors, field, message);
    }
}

/// Converts collected errors into the request outcome.
pub fn finish(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

/// Trims surrounding whitespace of a supplied string in place.
pub fn trim(value: &mut Option<Option<String>>) {
    if let Some(Some(v)) = value {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}
