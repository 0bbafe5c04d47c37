//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
///
/// Every validating factory in the domain fails with one of these before a
/// value is ever observable, so no value object exists in an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Invalid {type_name}: '{input}'")]
    InvalidFormat { type_name: String, input: String },

    #[error("Field '{field}' exceeds {max} characters (got {actual})")]
    FieldTooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Country mismatch: expected '{expected}', got '{actual}'")]
    CountryMismatch { expected: String, actual: String },

    #[error("Missing discriminator field '{field}'")]
    MissingDiscriminator { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format error carrying the rejected type and input.
    pub fn invalid_format(type_name: impl Into<String>, input: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            type_name: type_name.into(),
            input: input.into(),
        }
    }

    /// Creates a field-too-long error.
    pub fn field_too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::FieldTooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates a country mismatch error.
    pub fn country_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ValidationError::CountryMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a missing discriminator error.
    pub fn missing_discriminator(field: impl Into<String>) -> Self {
        ValidationError::MissingDiscriminator { field: field.into() }
    }

    /// Returns the error code for this validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::FieldTooLong { .. } => ErrorCode::FieldTooLong,
            ValidationError::CountryMismatch { .. } => ErrorCode::CountryMismatch,
            ValidationError::MissingDiscriminator { .. } => ErrorCode::MissingDiscriminator,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    FieldTooLong,
    CountryMismatch,
    MissingDiscriminator,

    // Not found errors
    EmployeeNotFound,
    LocationNotFound,
    ProjectNotFound,
    TaskNotFound,
    UserNotFound,

    // Concurrency errors
    OptimisticLockingFailure,

    // Infrastructure errors
    DatabaseError,
    SerializationError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::FieldTooLong => "FIELD_TOO_LONG",
            ErrorCode::CountryMismatch => "COUNTRY_MISMATCH",
            ErrorCode::MissingDiscriminator => "MISSING_DISCRIMINATOR",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::LocationNotFound => "LOCATION_NOT_FOUND",
            ErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
            ErrorCode::TaskNotFound => "TASK_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::OptimisticLockingFailure => "OPTIMISTIC_LOCKING_FAILURE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let error = DomainError::new(err.code(), err.to_string());
        match err {
            ValidationError::InvalidFormat { type_name, input } => error
                .with_detail("type", type_name)
                .with_detail("input", input),
            ValidationError::FieldTooLong { field, .. }
            | ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MissingDiscriminator { field } => error.with_detail("field", field),
            ValidationError::CountryMismatch { expected, actual } => error
                .with_detail("expected", expected)
                .with_detail("actual", actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("first_name");
        assert_eq!(format!("{}", err), "Field 'first_name' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_names_type_and_input() {
        let err = ValidationError::invalid_format("CanadianPostalCode", "K1A-0B1");
        assert_eq!(
            format!("{}", err),
            "Invalid CanadianPostalCode: 'K1A-0B1'"
        );
    }

    #[test]
    fn validation_error_field_too_long_displays_correctly() {
        let err = ValidationError::field_too_long("streetAddress", 150, 151);
        assert_eq!(
            format!("{}", err),
            "Field 'streetAddress' exceeds 150 characters (got 151)"
        );
    }

    #[test]
    fn validation_error_codes_are_specific() {
        assert_eq!(
            ValidationError::country_mismatch("CA", "DE").code(),
            ErrorCode::CountryMismatch
        );
        assert_eq!(
            ValidationError::missing_discriminator("country").code(),
            ErrorCode::MissingDiscriminator
        );
    }

    #[test]
    fn domain_error_from_invalid_format_keeps_input() {
        let err: DomainError = ValidationError::invalid_format("PhoneNumber", "abc").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.details.get("type"), Some(&"PhoneNumber".to_string()));
        assert_eq!(err.details.get("input"), Some(&"abc".to_string()));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TaskNotFound, "Task not found");
        assert_eq!(format!("{}", err), "[TASK_NOT_FOUND] Task not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "email")
            .with_detail("reason", "invalid format");

        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"invalid format".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::OptimisticLockingFailure),
            "OPTIMISTIC_LOCKING_FAILURE"
        );
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
