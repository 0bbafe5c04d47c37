//! Location repository port.
//!
//! Locations persist their address as a JSON document in the codec's wire
//! form; implementations decode it back through the codec on read.

use async_trait::async_trait;

use crate::domain::foundation::{EntityRepository, LocationId, RepositoryError};
use crate::domain::records::{Location, LocationData};

/// Repository port for Location aggregates.
#[async_trait]
pub trait LocationRepository: EntityRepository<LocationId, LocationData> {
    /// Locations whose address is in the given country.
    async fn find_by_country(&self, iso_code: &str) -> Result<Vec<Location>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LocationRepository) {}
    }
}
