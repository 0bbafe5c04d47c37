//! The closed `PostalAddress` sum type.

use serde::{Deserialize, Serialize};

use super::{
    CanadianPostalAddress, FinnishPostalAddress, GermanPostalAddress, InternationalPostalAddress,
    UsPostalAddress,
};
use crate::domain::values::Country;

/// Capability shared by every address variant.
pub trait Address {
    fn country(&self) -> &Country;

    /// Present fields in a fixed order, comma-separated, ending with the
    /// country display name.
    fn to_formatted_string(&self) -> String;
}

/// Which concrete shape an address takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressVariant {
    Canadian,
    Finnish,
    German,
    Us,
    International,
}

impl AddressVariant {
    /// Total mapping from ISO code to variant. Anything other than CA, FI, DE
    /// or US is international.
    pub fn for_country_code(iso_code: &str) -> Self {
        match iso_code.trim().to_ascii_uppercase().as_str() {
            CanadianPostalAddress::ISO_CODE => AddressVariant::Canadian,
            FinnishPostalAddress::ISO_CODE => AddressVariant::Finnish,
            GermanPostalAddress::ISO_CODE => AddressVariant::German,
            UsPostalAddress::ISO_CODE => AddressVariant::Us,
            _ => AddressVariant::International,
        }
    }
}

/// A postal address in one of five country-specific shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostalAddress {
    Canadian(CanadianPostalAddress),
    Finnish(FinnishPostalAddress),
    German(GermanPostalAddress),
    Us(UsPostalAddress),
    International(InternationalPostalAddress),
}

impl PostalAddress {
    /// An address with no optional fields, in the variant `country` selects.
    pub fn empty_for_country(country: Country) -> Self {
        match AddressVariant::for_country_code(country.iso_code()) {
            AddressVariant::Canadian => PostalAddress::Canadian(CanadianPostalAddress::blank(country)),
            AddressVariant::Finnish => PostalAddress::Finnish(FinnishPostalAddress::blank(country)),
            AddressVariant::German => PostalAddress::German(GermanPostalAddress::blank(country)),
            AddressVariant::Us => PostalAddress::Us(UsPostalAddress::blank(country)),
            AddressVariant::International => {
                PostalAddress::International(InternationalPostalAddress::blank(country))
            }
        }
    }

    pub fn variant(&self) -> AddressVariant {
        match self {
            PostalAddress::Canadian(_) => AddressVariant::Canadian,
            PostalAddress::Finnish(_) => AddressVariant::Finnish,
            PostalAddress::German(_) => AddressVariant::German,
            PostalAddress::Us(_) => AddressVariant::Us,
            PostalAddress::International(_) => AddressVariant::International,
        }
    }

    pub fn street_address(&self) -> Option<&str> {
        delegate_to_variant!(self, street_address)
    }
}

impl Address for PostalAddress {
    fn country(&self) -> &Country {
        delegate_to_variant!(self, country)
    }

    fn to_formatted_string(&self) -> String {
        delegate_to_variant!(self, to_formatted_string)
    }
}

impl From<CanadianPostalAddress> for PostalAddress {
    fn from(address: CanadianPostalAddress) -> Self {
        PostalAddress::Canadian(address)
    }
}

impl From<FinnishPostalAddress> for PostalAddress {
    fn from(address: FinnishPostalAddress) -> Self {
        PostalAddress::Finnish(address)
    }
}

impl From<GermanPostalAddress> for PostalAddress {
    fn from(address: GermanPostalAddress) -> Self {
        PostalAddress::German(address)
    }
}

impl From<UsPostalAddress> for PostalAddress {
    fn from(address: UsPostalAddress) -> Self {
        PostalAddress::Us(address)
    }
}

impl From<InternationalPostalAddress> for PostalAddress {
    fn from(address: InternationalPostalAddress) -> Self {
        PostalAddress::International(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::{GermanPostalCode, Locale};

    #[test]
    fn variant_selection_is_total() {
        assert_eq!(AddressVariant::for_country_code("CA"), AddressVariant::Canadian);
        assert_eq!(AddressVariant::for_country_code("fi"), AddressVariant::Finnish);
        assert_eq!(AddressVariant::for_country_code("DE"), AddressVariant::German);
        assert_eq!(AddressVariant::for_country_code("US"), AddressVariant::Us);
        assert_eq!(AddressVariant::for_country_code("SE"), AddressVariant::International);
        assert_eq!(AddressVariant::for_country_code(""), AddressVariant::International);
    }

    #[test]
    fn empty_for_country_picks_matching_variant() {
        let address = PostalAddress::empty_for_country(Country::of("DE").unwrap());
        assert_eq!(address.variant(), AddressVariant::German);
        assert_eq!(address.country().iso_code(), "DE");
        assert_eq!(address.to_formatted_string(), "Germany");
    }

    #[test]
    fn empty_for_unknown_country_is_international() {
        let address = PostalAddress::empty_for_country(Country::of("BR").unwrap());
        assert_eq!(address.variant(), AddressVariant::International);
    }

    #[test]
    fn delegates_formatting_to_variant() {
        let german = GermanPostalAddress::new(
            Some("Unter den Linden 77".into()),
            Some(GermanPostalCode::of("10117").unwrap()),
            Some("Berlin".into()),
            Country::of_locale("DE", Locale::De).unwrap(),
        )
        .unwrap();
        let address = PostalAddress::from(german);

        assert_eq!(address.street_address(), Some("Unter den Linden 77"));
        assert_eq!(
            address.to_formatted_string(),
            "Unter den Linden 77, 10117, Berlin, Deutschland"
        );
    }
}
