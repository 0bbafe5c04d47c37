//! German postal address.

use serde::{Deserialize, Serialize};

use super::{ensure_country, join_fields, Address};
use crate::domain::foundation::{optional_text, ValidationError, MAX_TEXT_LENGTH};
use crate::domain::values::{Country, GermanPostalCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GermanPostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<GermanPostalCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    country: Country,
}

impl GermanPostalAddress {
    pub const ISO_CODE: &'static str = "DE";

    pub fn new(
        street_address: Option<String>,
        postal_code: Option<GermanPostalCode>,
        city: Option<String>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        ensure_country(Self::ISO_CODE, &country)?;
        Ok(Self {
            street_address: optional_text("streetAddress", street_address, MAX_TEXT_LENGTH)?,
            postal_code,
            city: optional_text("city", city, MAX_TEXT_LENGTH)?,
            country,
        })
    }

    pub(super) fn blank(country: Country) -> Self {
        Self {
            street_address: None,
            postal_code: None,
            city: None,
            country,
        }
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    pub fn postal_code(&self) -> Option<&GermanPostalCode> {
        self.postal_code.as_ref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

impl Address for GermanPostalAddress {
    fn country(&self) -> &Country {
        &self.country
    }

    fn to_formatted_string(&self) -> String {
        join_fields(
            &[
                self.street_address(),
                self.postal_code.as_ref().map(|c| c.as_str()),
                self.city(),
            ],
            &self.country,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct GermanFields {
    street_address: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
}

impl GermanFields {
    pub(super) fn into_address(self, country: Country) -> Result<GermanPostalAddress, ValidationError> {
        let postal_code = self
            .postal_code
            .as_deref()
            .map(GermanPostalCode::of)
            .transpose()?;
        GermanPostalAddress::new(self.street_address, postal_code, self.city, country)
    }
}
