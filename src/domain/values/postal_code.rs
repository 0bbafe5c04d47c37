//! Country-specific postal code value objects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

// Letters D, F, I, O, Q, U never appear; W and Z are excluded from the
// first and third positions.
static CANADIAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-CEG-HJ-NPR-TVXY][0-9][A-CEG-HJ-NPR-TVXY] [0-9][A-CEG-HJ-NPR-TVW-Z][0-9]$")
        .expect("Canadian postal code pattern is valid")
});

static US_ZIP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("US ZIP code pattern is valid")
});

fn is_five_digits(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Canadian postal code in `A1A 1A1` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanadianPostalCode(String);

impl CanadianPostalCode {
    /// Checks the `A1A 1A1` rule against the input exactly as given.
    pub fn is_valid(value: &str) -> bool {
        value.len() == 7 && CANADIAN_PATTERN.is_match(value)
    }

    /// Trims and upper-cases the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim().to_uppercase();
        if !Self::is_valid(&canonical) {
            return Err(ValidationError::invalid_format("CanadianPostalCode", value));
        }
        Ok(Self(canonical))
    }
}

impl_string_value!(CanadianPostalCode);

/// Finnish postal code: five digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinnishPostalCode(String);

impl FinnishPostalCode {
    pub fn is_valid(value: &str) -> bool {
        is_five_digits(value)
    }

    /// Trims the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("FinnishPostalCode", value));
        }
        Ok(Self(canonical.to_string()))
    }
}

impl_string_value!(FinnishPostalCode);

/// German postal code (Postleitzahl): five digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GermanPostalCode(String);

impl GermanPostalCode {
    pub fn is_valid(value: &str) -> bool {
        is_five_digits(value)
    }

    /// Trims the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("GermanPostalCode", value));
        }
        Ok(Self(canonical.to_string()))
    }
}

impl_string_value!(GermanPostalCode);

/// US ZIP code, either `12345` or ZIP+4 `12345-6789`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsZipCode(String);

impl UsZipCode {
    pub fn is_valid(value: &str) -> bool {
        (5..=10).contains(&value.len()) && US_ZIP_PATTERN.is_match(value)
    }

    /// Trims the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("UsZipCode", value));
        }
        Ok(Self(canonical.to_string()))
    }

    /// Whether the code carries the four-digit add-on.
    pub fn is_zip_plus_four(&self) -> bool {
        self.0.len() == 10
    }
}

impl_string_value!(UsZipCode);
