//! Input validation helpers.
//!
//! DTOs derive [`validator::Validate`] for shape checks (lengths, email
//! format, numeric ranges). The helpers here cover the cross-field and
//! vocabulary checks the derive cannot express, and convert everything into
//! [`CoreError::Validation`].

use validator::Validate;

use crate::error::CoreError;
use crate::types::Date;

/// Run the derived validators, flattening failures into one message.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// Ensure `value` is one of `allowed`.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Ensure `end` does not precede `start`.
pub fn date_order(start: Date, end: Date) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "end_date must not be earlier than start_date".into(),
        ));
    }
    Ok(())
}

/// Ensure an optional monetary amount is non-negative.
pub fn non_negative(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(CoreError::Validation(format!(
            "{field} must be a non-negative number"
        ))),
        _ => Ok(()),
    }
}
