//! Canadian postal address.

use serde::{Deserialize, Serialize};

use super::{ensure_country, join_fields, Address};
use crate::domain::foundation::{optional_text, ValidationError, MAX_TEXT_LENGTH};
use crate::domain::values::{CanadianPostalCode, Country};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanadianPostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<CanadianPostalCode>,
    country: Country,
}

impl CanadianPostalAddress {
    pub const ISO_CODE: &'static str = "CA";

    pub fn new(
        street_address: Option<String>,
        city: Option<String>,
        province: Option<String>,
        postal_code: Option<CanadianPostalCode>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        ensure_country(Self::ISO_CODE, &country)?;
        Ok(Self {
            street_address: optional_text("streetAddress", street_address, MAX_TEXT_LENGTH)?,
            city: optional_text("city", city, MAX_TEXT_LENGTH)?,
            province: optional_text("province", province, MAX_TEXT_LENGTH)?,
            postal_code,
            country,
        })
    }

    pub(super) fn blank(country: Country) -> Self {
        Self {
            street_address: None,
            city: None,
            province: None,
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

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn postal_code(&self) -> Option<&CanadianPostalCode> {
        self.postal_code.as_ref()
    }
}

impl Address for CanadianPostalAddress {
    fn country(&self) -> &Country {
        &self.country
    }

    fn to_formatted_string(&self) -> String {
        join_fields(
            &[
                self.street_address(),
                self.city(),
                self.province(),
                self.postal_code.as_ref().map(|c| c.as_str()),
            ],
            &self.country,
        )
    }
}

/// Wire shape before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct CanadianFields {
    street_address: Option<String>,
    city: Option<String>,
    province: Option<String>,
    postal_code: Option<String>,
}

impl CanadianFields {
    pub(super) fn into_address(self, country: Country) -> Result<CanadianPostalAddress, ValidationError> {
        let postal_code = self
            .postal_code
            .as_deref()
            .map(CanadianPostalCode::of)
            .transpose()?;
        CanadianPostalAddress::new(
            self.street_address,
            self.city,
            self.province,
            postal_code,
            country,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canada() -> Country {
        Country::of("CA").unwrap()
    }

    #[test]
    fn builds_with_all_fields() {
        let address = CanadianPostalAddress::new(
            Some("24 Sussex Dr".into()),
            Some("Ottawa".into()),
            Some("ON".into()),
            Some(CanadianPostalCode::of("K1M 1M4").unwrap()),
            canada(),
        )
        .unwrap();

        assert_eq!(
            address.to_formatted_string(),
            "24 Sussex Dr, Ottawa, ON, K1M 1M4, Canada"
        );
    }

    #[test]
    fn rejects_foreign_country() {
        let err = CanadianPostalAddress::new(None, None, None, None, Country::of("DE").unwrap())
            .unwrap_err();
        assert_eq!(err, ValidationError::country_mismatch("CA", "DE"));
    }

    #[test]
    fn rejects_long_province() {
        let err = CanadianPostalAddress::new(None, None, Some("p".repeat(151)), None, canada())
            .unwrap_err();
        assert!(matches!(err, ValidationError::FieldTooLong { field, .. } if field == "province"));
    }

    #[test]
    fn formats_without_stray_separators() {
        let address =
            CanadianPostalAddress::new(None, Some("Toronto".into()), None, None, canada()).unwrap();
        assert_eq!(address.to_formatted_string(), "Toronto, Canada");
    }

    #[test]
    fn fields_reject_invalid_postal_code() {
        let fields = CanadianFields {
            street_address: None,
            city: None,
            province: None,
            postal_code: Some("12345".into()),
        };
        assert!(matches!(
            fields.into_address(canada()),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
