//! US postal address.

use serde::{Deserialize, Serialize};

use super::{ensure_country, join_fields, Address};
use crate::domain::foundation::{optional_text, ValidationError, MAX_TEXT_LENGTH};
use crate::domain::values::{Country, UsZipCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsPostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip_code: Option<UsZipCode>,
    country: Country,
}

impl UsPostalAddress {
    pub const ISO_CODE: &'static str = "US";

    pub fn new(
        street_address: Option<String>,
        city: Option<String>,
        state: Option<String>,
        zip_code: Option<UsZipCode>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        ensure_country(Self::ISO_CODE, &country)?;
        Ok(Self {
            street_address: optional_text("streetAddress", street_address, MAX_TEXT_LENGTH)?,
            city: optional_text("city", city, MAX_TEXT_LENGTH)?,
            state: optional_text("state", state, MAX_TEXT_LENGTH)?,
            zip_code,
            country,
        })
    }

    pub(super) fn blank(country: Country) -> Self {
        Self {
            street_address: None,
            city: None,
            state: None,
            zip_code: None,
            country,
        }
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn zip_code(&self) -> Option<&UsZipCode> {
        self.zip_code.as_ref()
    }
}

impl Address for UsPostalAddress {
    fn country(&self) -> &Country {
        &self.country
    }

    fn to_formatted_string(&self) -> String {
        join_fields(
            &[
                self.street_address(),
                self.city(),
                self.state(),
                self.zip_code.as_ref().map(|z| z.as_str()),
            ],
            &self.country,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(super) struct UsFields {
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
}

impl UsFields {
    pub(super) fn into_address(self, country: Country) -> Result<UsPostalAddress, ValidationError> {
        let zip_code = self.zip_code.as_deref().map(UsZipCode::of).transpose()?;
        UsPostalAddress::new(self.street_address, self.city, self.state, zip_code, country)
    }
}
