//! Length-checked free-text helpers shared by addresses and aggregates.

use super::ValidationError;

/// Maximum length of any free-text field on a record.
pub const MAX_TEXT_LENGTH: usize = 150;

/// Validates an optional free-text field.
///
/// Blank input collapses to `None`; anything longer than `max` characters
/// fails with `FieldTooLong`.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            check_length(field, trimmed, max)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Validates a mandatory free-text field (trimmed, non-empty, length-capped).
pub fn required_text(
    field: &str,
    value: impl Into<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length > max {
        return Err(ValidationError::field_too_long(field, max, length));
    }
    Ok(())
}
