//! Finnish postal address.

use serde::{Deserialize, Serialize};

use super::{ensure_country, join_fields, Address};
use crate::domain::foundation::{optional_text, ValidationError, MAX_TEXT_LENGTH};
use crate::domain::values::{Country, FinnishPostalCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinnishPostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<FinnishPostalCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_office: Option<String>,
    country: Country,
}

impl FinnishPostalAddress {
    pub const ISO_CODE: &'static str = "FI";

    pub fn new(
        street_address: Option<String>,
        postal_code: Option<FinnishPostalCode>,
        post_office: Option<String>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        ensure_country(Self::ISO_CODE, &country)?;
        Ok(Self {
            street_address: optional_text("streetAddress", street_address, MAX_TEXT_LENGTH)?,
            postal_code,
            post_office: optional_text("postOffice", post_office, MAX_TEXT_LENGTH)?,
            country,
        })
    }

    pub(super) fn blank(country: Country) -> Self {
        Self {
            street_address: None,
            postal_code: None,
            post_office: None,
            country,
        }
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    pub fn postal_code(&self) -> Option<&FinnishPostalCode> {
        self.postal_code.as_ref()
    }

    pub fn post_office(&self) -> Option<&str> {
        self.post_office.as_deref()
    }
}

impl Address for FinnishPostalAddress {
    fn country(&self) -> &Country {
        &self.country
    }

    fn to_formatted_string(&self) -> String {
        join_fields(
            &[
                self.street_address(),
                self.postal_code.as_ref().map(|c| c.as_str()),
                self.post_office(),
            ],
            &self.country,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct FinnishFields {
    street_address: Option<String>,
    postal_code: Option<String>,
    post_office: Option<String>,
}

impl FinnishFields {
    pub(super) fn into_address(self, country: Country) -> Result<FinnishPostalAddress, ValidationError> {
        let postal_code = self
            .postal_code
            .as_deref()
            .map(FinnishPostalCode::of)
            .transpose()?;
        FinnishPostalAddress::new(self.street_address, postal_code, self.post_office, country)
    }
}
