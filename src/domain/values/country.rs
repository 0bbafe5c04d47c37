//! Country value object with locale-keyed display names.
//!
//! Display names come from [`country_display_names`], a pure lookup keyed by
//! [`Locale`]; callers that need a specific language pass the locale through
//! [`Country::of_locale`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Languages with built-in country display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fi,
    De,
    Fr,
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fi" => Ok(Locale::Fi),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            _ => Err(ValidationError::invalid_format("Locale", s)),
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("AT", "Austria"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EE", "Estonia"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("SE", "Sweden"),
    ("US", "United States"),
];

const FI: &[(&str, &str)] = &[
    ("AT", "Itävalta"),
    ("CA", "Kanada"),
    ("CH", "Sveitsi"),
    ("DE", "Saksa"),
    ("DK", "Tanska"),
    ("EE", "Viro"),
    ("ES", "Espanja"),
    ("FI", "Suomi"),
    ("FR", "Ranska"),
    ("GB", "Yhdistynyt kuningaskunta"),
    ("IT", "Italia"),
    ("JP", "Japani"),
    ("MX", "Meksiko"),
    ("NL", "Alankomaat"),
    ("NO", "Norja"),
    ("SE", "Ruotsi"),
    ("US", "Yhdysvallat"),
];

const DE: &[(&str, &str)] = &[
    ("AT", "Österreich"),
    ("CA", "Kanada"),
    ("CH", "Schweiz"),
    ("DE", "Deutschland"),
    ("DK", "Dänemark"),
    ("EE", "Estland"),
    ("ES", "Spanien"),
    ("FI", "Finnland"),
    ("FR", "Frankreich"),
    ("GB", "Vereinigtes Königreich"),
    ("IT", "Italien"),
    ("JP", "Japan"),
    ("MX", "Mexiko"),
    ("NL", "Niederlande"),
    ("NO", "Norwegen"),
    ("SE", "Schweden"),
    ("US", "Vereinigte Staaten"),
];

const FR: &[(&str, &str)] = &[
    ("AT", "Autriche"),
    ("CA", "Canada"),
    ("CH", "Suisse"),
    ("DE", "Allemagne"),
    ("DK", "Danemark"),
    ("EE", "Estonie"),
    ("ES", "Espagne"),
    ("FI", "Finlande"),
    ("FR", "France"),
    ("GB", "Royaume-Uni"),
    ("IT", "Italie"),
    ("JP", "Japon"),
    ("MX", "Mexique"),
    ("NL", "Pays-Bas"),
    ("NO", "Norvège"),
    ("SE", "Suède"),
    ("US", "États-Unis"),
];

/// Returns the `(iso_code, display_name)` table for a locale, sorted by code.
pub fn country_display_names(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Fi => FI,
        Locale::De => DE,
        Locale::Fr => FR,
    }
}

/// ISO 3166-1 alpha-2 country with a display name.
///
/// Equality and hashing use the ISO code only; the display name is
/// presentation and depends on the locale the value was built with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Country {
    iso_code: String,
    display_name: String,
}

impl Country {
    /// Two ASCII letters, in either case.
    pub fn is_valid(code: &str) -> bool {
        code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// Builds a country with its English display name.
    pub fn of(code: &str) -> Result<Self, ValidationError> {
        Self::of_locale(code, Locale::default())
    }

    /// Builds a country with its display name in `locale`. Codes without a
    /// known name use the code itself as display name.
    pub fn of_locale(code: &str, locale: Locale) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if !Self::is_valid(trimmed) {
            return Err(ValidationError::invalid_format("Country", code));
        }
        let iso_code = trimmed.to_ascii_uppercase();
        let display_name = country_display_names(locale)
            .binary_search_by(|(c, _)| (*c).cmp(iso_code.as_str()))
            .map(|i| country_display_names(locale)[i].1.to_string())
            .unwrap_or_else(|_| iso_code.clone());
        Ok(Self {
            iso_code,
            display_name,
        })
    }

    /// Every country with a known display name in `locale`.
    pub fn all(locale: Locale) -> Vec<Country> {
        country_display_names(locale)
            .iter()
            .map(|(code, name)| Country {
                iso_code: (*code).to_string(),
                display_name: (*name).to_string(),
            })
            .collect()
    }

    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.iso_code == other.iso_code
    }
}

impl Eq for Country {}

impl Hash for Country {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso_code.hash(state);
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TryFrom<String> for Country {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(&value)
    }
}

impl From<Country> for String {
    fn from(country: Country) -> String {
        country.iso_code
    }
}
