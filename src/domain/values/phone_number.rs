//! Phone number value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum length of a sanitized phone number, including a leading `+`.
pub const MAX_PHONE_LENGTH: usize = 16;

/// Phone number stored as an optional `+` followed by digits.
///
/// Formatting characters (whitespace, `-`, `(`, `)`, `.`) are stripped by
/// [`PhoneNumber::of`] before validation, so `(416) 555-0123` and
/// `4165550123` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Removes formatting characters.
    pub fn sanitize(value: &str) -> String {
        value
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
            .collect()
    }

    /// Checks the sanitized-form rule: at most 16 characters, an optional
    /// leading `+`, and at least one ASCII digit with nothing else.
    pub fn is_valid(value: &str) -> bool {
        if value.len() > MAX_PHONE_LENGTH {
            return false;
        }
        let digits = value.strip_prefix('+').unwrap_or(value);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    /// Sanitizes the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let sanitized = Self::sanitize(value);
        if !Self::is_valid(&sanitized) {
            return Err(ValidationError::invalid_format("PhoneNumber", value));
        }
        Ok(Self(sanitized))
    }

    /// Whether the number carries an explicit international prefix.
    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }
}

impl_string_value!(PhoneNumber);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formatted_number_equals_plain_digits() {
        let formatted = PhoneNumber::of("(416) 555-0123").unwrap();
        let plain = PhoneNumber::of("4165550123").unwrap();
        assert_eq!(formatted, plain);
        assert_eq!(formatted.as_str(), "4165550123");
    }

    #[test]
    fn too_long_after_sanitize_is_rejected() {
        let err = PhoneNumber::of("416-555-01234567890").unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid_format("PhoneNumber", "416-555-01234567890")
        );
    }

    #[test]
    fn international_prefix_is_kept() {
        let phone = PhoneNumber::of("+358 40 123.4567").unwrap();
        assert_eq!(phone.as_str(), "+358401234567");
        assert!(phone.is_international());
    }

    #[test]
    fn sixteen_characters_including_plus_is_allowed() {
        assert!(PhoneNumber::is_valid("+123456789012345"));
        assert!(!PhoneNumber::is_valid("+1234567890123456"));
    }

    #[test]
    fn letters_and_misplaced_plus_are_rejected() {
        assert!(PhoneNumber::of("555-CALL-NOW").is_err());
        assert!(PhoneNumber::of("12+34").is_err());
        assert!(PhoneNumber::of("++1234").is_err());
    }

    #[test]
    fn empty_and_plus_only_are_rejected() {
        assert!(PhoneNumber::of("").is_err());
        assert!(PhoneNumber::of(" - ").is_err());
        assert!(PhoneNumber::of("+").is_err());
    }

    #[test]
    fn phone_deserializes_through_sanitize() {
        let phone: PhoneNumber = serde_json::from_str("\"(416) 555-0123\"").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"4165550123\"");
    }

    proptest! {
        #[test]
        fn valid_numbers_round_trip(s in r"\+?[0-9]{1,15}") {
            prop_assert!(PhoneNumber::is_valid(&s));
            let phone = PhoneNumber::of(&s).unwrap();
            prop_assert_eq!(PhoneNumber::of(&phone.to_string()).unwrap(), phone);
        }
    }
}
