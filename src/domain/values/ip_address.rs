//! IP address value objects.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::domain::foundation::ValidationError;

/// Dotted-quad IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Address(String);

impl Ipv4Address {
    /// Four dot-separated decimal octets, each 0-255, 7 to 15 characters in
    /// total.
    pub fn is_valid(value: &str) -> bool {
        if !(7..=15).contains(&value.len()) {
            return false;
        }
        let octets: Vec<&str> = value.split('.').collect();
        octets.len() == 4 && octets.iter().all(|octet| is_octet(octet))
    }

    /// Trims the input, then validates it.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("Ipv4Address", value));
        }
        Ok(Self(canonical.to_string()))
    }
}

impl_string_value!(Ipv4Address);

fn is_octet(octet: &str) -> bool {
    (1..=3).contains(&octet.len())
        && octet.bytes().all(|b| b.is_ascii_digit())
        && octet.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
}

/// Colon-separated IPv6 address, optionally using `::` shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv6Address(String);

impl Ipv6Address {
    /// Checks hex groups of 1-4 digits separated by colons. `::` may appear
    /// once and stands for one or more zero groups; without it exactly eight
    /// groups are required.
    pub fn is_valid(value: &str) -> bool {
        if value.len() < 2 || value.len() > 39 {
            return false;
        }
        let compressed = value.matches("::").count();
        if compressed > 1 || value.contains(":::") {
            return false;
        }
        if value.starts_with(':') && !value.starts_with("::") {
            return false;
        }
        if value.ends_with(':') && !value.ends_with("::") {
            return false;
        }

        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() < 3 || parts.len() > 8 + usize::from(compressed == 1) {
            return false;
        }

        let groups: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        let groups_valid = groups
            .iter()
            .all(|g| g.len() <= 4 && g.bytes().all(|b| b.is_ascii_hexdigit()));

        match compressed {
            0 => groups_valid && groups.len() == 8,
            _ => groups_valid && groups.len() <= 7,
        }
    }

    /// Trims the input, then validates it. Hex digits keep their case.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("Ipv6Address", value));
        }
        Ok(Self(canonical.to_string()))
    }
}

impl_string_value!(Ipv6Address);

/// Either kind of IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IpAddress {
    V4(Ipv4Address),
    V6(Ipv6Address),
}

impl IpAddress {
    pub fn is_valid(value: &str) -> bool {
        Ipv4Address::is_valid(value) || Ipv6Address::is_valid(value)
    }

    /// Parses as IPv4 first, then IPv6.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        if let Ok(v4) = Ipv4Address::of(value) {
            return Ok(IpAddress::V4(v4));
        }
        Ipv6Address::of(value)
            .map(IpAddress::V6)
            .map_err(|_| ValidationError::invalid_format("IpAddress", value))
    }

    pub fn as_str(&self) -> &str {
        match self {
            IpAddress::V4(a) => a.as_str(),
            IpAddress::V6(a) => a.as_str(),
        }
    }

    /// Converts to the standard library representation.
    pub fn to_std(&self) -> Option<IpAddr> {
        self.as_str().parse().ok()
    }
}

impl std::fmt::Display for IpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IpAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TryFrom<String> for IpAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(&value)
    }
}

impl From<IpAddress> for String {
    fn from(value: IpAddress) -> String {
        match value {
            IpAddress::V4(a) => a.into(),
            IpAddress::V6(a) => a.into(),
        }
    }
}
