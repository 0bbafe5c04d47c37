//! Polymorphic postal addresses.
//!
//! `PostalAddress` is a closed enum over five country-specific variants.
//! Every variant caps its free-text fields at 150 characters and the
//! country-specific ones refuse a `Country` whose ISO code differs from
//! their own. Variant selection from a country code is total:
//!
//! | Code | Variant |
//! |------|---------|
//! | `CA` | `CanadianPostalAddress` |
//! | `FI` | `FinnishPostalAddress` |
//! | `DE` | `GermanPostalAddress` |
//! | `US` | `UsPostalAddress` |
//! | other | `InternationalPostalAddress` |
//!
//! The JSON wire format lives in [`codec`].

use crate::domain::foundation::ValidationError;
use crate::domain::values::Country;

/// Expands to an exhaustive match over `PostalAddress` that calls `$method`
/// on the inner variant.
macro_rules! delegate_to_variant {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            PostalAddress::Canadian(a) => a.$method($($arg),*),
            PostalAddress::Finnish(a) => a.$method($($arg),*),
            PostalAddress::German(a) => a.$method($($arg),*),
            PostalAddress::Us(a) => a.$method($($arg),*),
            PostalAddress::International(a) => a.$method($($arg),*),
        }
    };
}

mod canadian;
pub mod codec;
mod finnish;
mod german;
mod international;
mod postal_address;
mod us;

pub use canadian::CanadianPostalAddress;
pub use codec::AddressCodecError;
pub use finnish::FinnishPostalAddress;
pub use german::GermanPostalAddress;
pub use international::InternationalPostalAddress;
pub use postal_address::{Address, AddressVariant, PostalAddress};
pub use us::UsPostalAddress;

/// Fails with `CountryMismatch` unless `country` carries `expected`.
fn ensure_country(expected: &str, country: &Country) -> Result<(), ValidationError> {
    if country.iso_code() != expected {
        return Err(ValidationError::country_mismatch(expected, country.iso_code()));
    }
    Ok(())
}

/// Comma-joins the present parts and appends the country display name.
fn join_fields(parts: &[Option<&str>], country: &Country) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .chain(std::iter::once(country.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}
