//! Discriminated JSON codec for [`PostalAddress`].
//!
//! The wire form is a flat object holding the active variant's camelCase
//! fields plus `country`, the ISO code that selects the variant on decode:
//!
//! ```json
//! { "streetAddress": "24 Sussex Dr", "city": "Ottawa", "province": "ON",
//!   "postalCode": "K1M 1M4", "country": "CA" }
//! ```
//!
//! Decoding dispatches on `country` with the same CA/FI/DE/US/else mapping as
//! [`AddressVariant::for_country_code`] and then runs the variant's
//! constructor, so every invariant applies to decoded values too.
//!
//! Only the ISO code travels on the wire. The display name of the decoded
//! country comes from the locale passed to [`decode_in`], or English for
//! [`decode`].

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::canadian::CanadianFields;
use super::finnish::FinnishFields;
use super::german::GermanFields;
use super::international::InternationalFields;
use super::us::UsFields;
use super::{AddressVariant, PostalAddress};
use crate::domain::foundation::ValidationError;
use crate::domain::values::{Country, Locale};

/// Name of the discriminator field.
pub const COUNTRY_FIELD: &str = "country";

/// Errors raised while decoding an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressCodecError {
    /// The payload decoded structurally but violates an address or value
    /// object rule (including `MissingDiscriminator`).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload is not an object of the expected shape.
    #[error("Malformed address payload: {0}")]
    Malformed(String),
}

/// Encodes an address to its JSON object form.
pub fn encode(address: &PostalAddress) -> Result<Value, AddressCodecError> {
    let encoded = match address {
        PostalAddress::Canadian(a) => serde_json::to_value(a),
        PostalAddress::Finnish(a) => serde_json::to_value(a),
        PostalAddress::German(a) => serde_json::to_value(a),
        PostalAddress::Us(a) => serde_json::to_value(a),
        PostalAddress::International(a) => serde_json::to_value(a),
    };
    encoded.map_err(|e| AddressCodecError::Malformed(e.to_string()))
}

/// Decodes an address from its JSON object form, naming the country in
/// English.
///
/// Country equality compares ISO codes, so the result equals the encoded
/// address whatever locale that address was built with. Its
/// `to_formatted_string` uses English though; use [`decode_in`] to keep a
/// different locale.
///
/// # Errors
///
/// - `MissingDiscriminator` when `country` is absent or null
/// - `InvalidFormat` when `country` or a postal code is malformed
/// - `FieldTooLong` when a free-text field exceeds 150 characters
/// - `Malformed` when the payload is not an object or a field has the wrong
///   JSON type
pub fn decode(value: &Value) -> Result<PostalAddress, AddressCodecError> {
    decode_in(value, Locale::default())
}

/// Like [`decode`], with the country display name taken from `locale`.
pub fn decode_in(value: &Value, locale: Locale) -> Result<PostalAddress, AddressCodecError> {
    let country = discriminator(value, locale)?;
    let variant = AddressVariant::for_country_code(country.iso_code());
    build(variant, value, country)
}

/// Decodes `value` with a caller-chosen variant's structural deserializer.
///
/// Unlike [`decode`], the variant does not follow from the payload, so a
/// Canadian-shaped payload carrying `"country": "US"` fails with
/// `CountryMismatch` from the Canadian constructor.
pub fn decode_as(variant: AddressVariant, value: &Value) -> Result<PostalAddress, AddressCodecError> {
    let country = discriminator(value, Locale::default())?;
    build(variant, value, country)
}

fn discriminator(value: &Value, locale: Locale) -> Result<Country, AddressCodecError> {
    let object = value
        .as_object()
        .ok_or_else(|| AddressCodecError::Malformed("expected a JSON object".to_string()))?;

    match object.get(COUNTRY_FIELD) {
        None | Some(Value::Null) => Err(ValidationError::missing_discriminator(COUNTRY_FIELD).into()),
        Some(Value::String(code)) => Ok(Country::of_locale(code, locale)?),
        Some(other) => Err(AddressCodecError::Malformed(format!(
            "'{}' must be a string, got {}",
            COUNTRY_FIELD, other
        ))),
    }
}

fn build(
    variant: AddressVariant,
    value: &Value,
    country: Country,
) -> Result<PostalAddress, AddressCodecError> {
    let address = match variant {
        AddressVariant::Canadian => {
            PostalAddress::Canadian(fields::<CanadianFields>(value)?.into_address(country)?)
        }
        AddressVariant::Finnish => {
            PostalAddress::Finnish(fields::<FinnishFields>(value)?.into_address(country)?)
        }
        AddressVariant::German => {
            PostalAddress::German(fields::<GermanFields>(value)?.into_address(country)?)
        }
        AddressVariant::Us => PostalAddress::Us(fields::<UsFields>(value)?.into_address(country)?),
        AddressVariant::International => PostalAddress::International(
            fields::<InternationalFields>(value)?.into_address(country)?,
        ),
    };
    Ok(address)
}

/// Decodes an address from JSON text.
pub fn decode_str(json: &str) -> Result<PostalAddress, AddressCodecError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| AddressCodecError::Malformed(e.to_string()))?;
    decode(&value)
}

/// Decodes the variant fields with the discriminator removed. The wire structs
/// deny unknown keys, so a payload shaped for another variant is rejected
/// instead of losing the keys the selected variant does not know.
fn fields<T: de::DeserializeOwned>(value: &Value) -> Result<T, AddressCodecError> {
    let mut object = value
        .as_object()
        .cloned()
        .ok_or_else(|| AddressCodecError::Malformed("expected a JSON object".to_string()))?;
    object.remove(COUNTRY_FIELD);
    T::deserialize(Value::Object(object)).map_err(|e| AddressCodecError::Malformed(e.to_string()))
}

impl Serialize for PostalAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PostalAddress::Canadian(a) => a.serialize(serializer),
            PostalAddress::Finnish(a) => a.serialize(serializer),
            PostalAddress::German(a) => a.serialize(serializer),
            PostalAddress::Us(a) => a.serialize(serializer),
            PostalAddress::International(a) => a.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PostalAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(de::Error::custom)
    }
}
