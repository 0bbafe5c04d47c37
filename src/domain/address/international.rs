//! Fallback address for every country without a dedicated variant.
//!
//! Only the 150-character cap applies; the postal code is free text. CA, FI,
//! DE and US are refused so that decoding never picks a different variant
//! than the one that was encoded.

use serde::{Deserialize, Serialize};

use super::{join_fields, Address, AddressVariant};
use crate::domain::foundation::{optional_text, ValidationError, MAX_TEXT_LENGTH};
use crate::domain::values::Country;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalPostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_province_or_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
    country: Country,
}

impl InternationalPostalAddress {
    /// Reported as the expected code when a dedicated country is refused.
    pub const EXPECTED_COUNTRY: &'static str = "any country other than CA, FI, DE or US";

    pub fn new(
        street_address: Option<String>,
        city: Option<String>,
        state_province_or_region: Option<String>,
        postal_code: Option<String>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        if AddressVariant::for_country_code(country.iso_code()) != AddressVariant::International {
            return Err(ValidationError::country_mismatch(
                Self::EXPECTED_COUNTRY,
                country.iso_code(),
            ));
        }
        Ok(Self {
            street_address: optional_text("streetAddress", street_address, MAX_TEXT_LENGTH)?,
            city: optional_text("city", city, MAX_TEXT_LENGTH)?,
            state_province_or_region: optional_text(
                "stateProvinceOrRegion",
                state_province_or_region,
                MAX_TEXT_LENGTH,
            )?,
            postal_code: optional_text("postalCode", postal_code, MAX_TEXT_LENGTH)?,
            country,
        })
    }

    pub(super) fn blank(country: Country) -> Self {
        Self {
            street_address: None,
            city: None,
            state_province_or_region: None,
            postal_code: None,
            country,
        }
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state_province_or_region(&self) -> Option<&str> {
        self.state_province_or_region.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }
}

impl Address for InternationalPostalAddress {
    fn country(&self) -> &Country {
        &self.country
    }

    fn to_formatted_string(&self) -> String {
        join_fields(
            &[
                self.street_address(),
                self.city(),
                self.state_province_or_region(),
                self.postal_code(),
            ],
            &self.country,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct InternationalFields {
    street_address: Option<String>,
    city: Option<String>,
    state_province_or_region: Option<String>,
    postal_code: Option<String>,
}

impl InternationalFields {
    pub(super) fn into_address(
        self,
        country: Country,
    ) -> Result<InternationalPostalAddress, ValidationError> {
        InternationalPostalAddress::new(
            self.street_address,
            self.city,
            self.state_province_or_region,
            self.postal_code,
            country,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweden() -> Country {
        Country::of("SE").unwrap()
    }

    #[test]
    fn rejects_151_character_street_address() {
        let err = InternationalPostalAddress::new(Some("s".repeat(151)), None, None, None, sweden())
            .unwrap_err();
        assert_eq!(err, ValidationError::field_too_long("streetAddress", 150, 151));
    }

    #[test]
    fn rejects_countries_with_a_dedicated_variant() {
        for code in ["CA", "FI", "DE", "US"] {
            let err = InternationalPostalAddress::new(
                Some("1 Main St".into()),
                None,
                None,
                Some("free text".into()),
                Country::of(code).unwrap(),
            )
            .unwrap_err();
            assert_eq!(
                err,
                ValidationError::country_mismatch(InternationalPostalAddress::EXPECTED_COUNTRY, code)
            );
        }
    }

    #[test]
    fn postal_code_is_unchecked_free_text() {
        let address = InternationalPostalAddress::new(
            Some("Drottninggatan 1".into()),
            Some("Stockholm".into()),
            None,
            Some("111 51".into()),
            sweden(),
        )
        .unwrap();
        assert_eq!(
            address.to_formatted_string(),
            "Drottninggatan 1, Stockholm, 111 51, Sweden"
        );
    }

    #[test]
    fn postal_code_is_length_capped() {
        let result =
            InternationalPostalAddress::new(None, None, None, Some("9".repeat(151)), sweden());
        assert!(matches!(result, Err(ValidationError::FieldTooLong { .. })));
    }
}
