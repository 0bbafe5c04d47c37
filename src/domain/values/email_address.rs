//! E-mail address value object.

use serde::{Deserialize, Serialize};

use super::{Ipv4Address, Ipv6Address};
use crate::domain::foundation::ValidationError;

const MAX_EMAIL_LENGTH: usize = 320;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// E-mail address with a dot-atom local part and either a domain name or a
/// bracketed IP literal (`user@[192.168.0.1]`, `user@[IPv6:::1]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn is_valid(value: &str) -> bool {
        if value.is_empty() || value.len() > MAX_EMAIL_LENGTH {
            return false;
        }
        let mut parts = value.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return false,
        };
        is_valid_local_part(local) && is_valid_domain(domain)
    }

    /// Trims the input, then validates it. Case is preserved.
    pub fn of(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim();
        if !Self::is_valid(canonical) {
            return Err(ValidationError::invalid_format("EmailAddress", value));
        }
        Ok(Self(canonical.to_string()))
    }

    /// The part before `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    /// The part after `@`, including brackets for IP literals.
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or_default()
    }
}

impl_string_value!(EmailAddress);

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-.".contains(c)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= MAX_LOCAL_PART_LENGTH
        && local.chars().all(is_local_char)
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
}

fn is_valid_domain(domain: &str) -> bool {
    match domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        Some(literal) => is_valid_address_literal(literal),
        None => is_valid_domain_name(domain),
    }
}

fn is_valid_address_literal(literal: &str) -> bool {
    match literal.strip_prefix("IPv6:") {
        Some(v6) => Ipv6Address::is_valid(v6),
        None => Ipv4Address::is_valid(literal) || Ipv6Address::is_valid(literal),
    }
}

/// At least two labels of letters, digits and inner hyphens; the last label
/// must not be all digits so a bare dotted quad is not taken for a name.
fn is_valid_domain_name(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LENGTH {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_valid = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });
    let tld_ok = labels
        .last()
        .map(|tld| !tld.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false);
    labels_valid && tld_ok
}
