//! Location aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, PostalAddress};
use crate::domain::foundation::{
    required_text, Entity, LocationId, ValidationError, MAX_TEXT_LENGTH,
};
use crate::domain::values::IpAddress;

/// Stored location snapshot.
pub type Location = Entity<LocationId, LocationData>;

/// What kind of site a location is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationFacility {
    Office,
    Warehouse,
    DataCenter { gateway: IpAddress },
}

impl LocationFacility {
    pub fn label(&self) -> &'static str {
        match self {
            LocationFacility::Office => "Office",
            LocationFacility::Warehouse => "Warehouse",
            LocationFacility::DataCenter { .. } => "Data center",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    name: String,
    address: PostalAddress,
    facility: LocationFacility,
}

impl LocationData {
    pub fn new(
        name: impl Into<String>,
        address: PostalAddress,
        facility: LocationFacility,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name, MAX_TEXT_LENGTH)?,
            address,
            facility,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &PostalAddress {
        &self.address
    }

    pub fn facility(&self) -> &LocationFacility {
        &self.facility
    }

    /// One-line summary used in listings.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {}",
            self.name,
            self.facility.label(),
            self.address.to_formatted_string()
        )
    }

    pub fn with_address(mut self, address: PostalAddress) -> Self {
        self.address = address;
        self
    }

    pub fn with_facility(mut self, facility: LocationFacility) -> Self {
        self.facility = facility;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::Country;
    use serde_json::json;

    #[test]
    fn facility_serializes_with_kind_tag() {
        let facility = LocationFacility::DataCenter {
            gateway: IpAddress::of("10.0.0.1").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&facility).unwrap(),
            json!({ "kind": "data_center", "gateway": "10.0.0.1" })
        );
        let back: LocationFacility =
            serde_json::from_value(json!({ "kind": "office" })).unwrap();
        assert_eq!(back, LocationFacility::Office);
    }

    #[test]
    fn summary_includes_formatted_address() {
        let data = LocationData::new(
            "HQ",
            PostalAddress::empty_for_country(Country::of("FI").unwrap()),
            LocationFacility::Office,
        )
        .unwrap();
        assert_eq!(data.summary(), "HQ (Office): Finland");
    }
}
