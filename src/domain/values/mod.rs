//! Validated value objects.
//!
//! Every type here wraps a canonical string and can only be obtained through
//! its validating `of` factory (or `FromStr` / `TryFrom<String>` /
//! `Deserialize`, which delegate to it). Each type also exposes a pure
//! `is_valid` predicate implementing its format rule.
//!
//! - `postal_code` - Canadian, Finnish, German and US postal codes
//! - `phone_number` - Sanitized international phone numbers
//! - `email_address` - RFC 5321-style addresses with literal domains
//! - `ip_address` - IPv4, IPv6 and the `IpAddress` sum of both
//! - `country` - ISO 3166 country with locale-keyed display names

/// Implements the shared string-value-object surface for a newtype whose
/// validating factory is `fn of(&str) -> Result<Self, ValidationError>`.
macro_rules! impl_string_value {
    ($name:ident) => {
        impl $name {
            /// Returns the canonical string form.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::foundation::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::of(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::foundation::ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::of(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

mod country;
mod email_address;
mod ip_address;
mod phone_number;
mod postal_code;

pub use country::{country_display_names, Country, Locale};
pub use email_address::EmailAddress;
pub use ip_address::{IpAddress, Ipv4Address, Ipv6Address};
pub use phone_number::PhoneNumber;
pub use postal_code::{CanadianPostalCode, FinnishPostalCode, GermanPostalCode, UsZipCode};
