//! PostgreSQL implementation of LocationRepository.
//!
//! The postal address is stored as JSONB in its discriminated wire form, so
//! reading a row runs the same validation as decoding an API payload. The
//! country code is also kept in its own column for `find_by_country`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use super::support::{address_error, check_updated, database_error, delete_row, json_error};
use crate::domain::address::{codec, Address};
use crate::domain::foundation::{
    Entity, EntityRepository, LocationId, RepositoryError, Version,
};
use crate::domain::records::{Location, LocationData, LocationFacility};
use crate::ports::LocationRepository;

const ENTITY: &str = "Location";

/// PostgreSQL implementation of the LocationRepository port.
#[derive(Clone)]
pub struct PostgresLocationRepository {
    pool: PgPool,
}

impl PostgresLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    id: i64,
    version: i32,
    name: String,
    address: Value,
    facility: Value,
}

impl TryFrom<LocationRow> for Location {
    type Error = RepositoryError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        let address = codec::decode(&row.address).map_err(address_error)?;
        let facility: LocationFacility = serde_json::from_value(row.facility).map_err(json_error)?;
        let data = LocationData::new(row.name, address, facility)?;
        Ok(Entity::new(LocationId::new(row.id)?, Version::new(row.version)?, data))
    }
}

/// Column values written for a location.
struct LocationColumns {
    country_code: String,
    address: Value,
    facility: Value,
}

impl LocationColumns {
    fn of(data: &LocationData) -> Result<Self, RepositoryError> {
        Ok(Self {
            country_code: data.address().country().iso_code().to_string(),
            address: codec::encode(data.address()).map_err(address_error)?,
            facility: serde_json::to_value(data.facility()).map_err(json_error)?,
        })
    }
}

#[async_trait]
impl EntityRepository<LocationId, LocationData> for PostgresLocationRepository {
    async fn insert(&self, data: LocationData) -> Result<Location, RepositoryError> {
        let columns = LocationColumns::of(&data)?;
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO locations (version, name, country_code, address, facility)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Version::INITIAL.value())
        .bind(data.name())
        .bind(&columns.country_code)
        .bind(&columns.address)
        .bind(&columns.facility)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("insert location"))?;

        debug!(location_id = id, country = %columns.country_code, "Inserted location");
        Ok(Entity::new(LocationId::new(id)?, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, RepositoryError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT id, version, name, address, facility FROM locations WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("fetch location"))?;

        row.map(Location::try_from).transpose()
    }

    async fn update(&self, location: &Location) -> Result<Location, RepositoryError> {
        let data = location.data();
        let columns = LocationColumns::of(data)?;
        let result = sqlx::query(
            r#"
            UPDATE locations SET
                name = $3,
                country_code = $4,
                address = $5,
                facility = $6,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(location.id().value())
        .bind(location.version().value())
        .bind(data.name())
        .bind(&columns.country_code)
        .bind(&columns.address)
        .bind(&columns.facility)
        .execute(&self.pool)
        .await
        .map_err(database_error("update location"))?;

        let version = check_updated(&result, ENTITY, location.id(), location.version())?;
        Ok(Entity::new(*location.id(), version, data.clone()))
    }

    async fn delete_by_id(&self, id: LocationId) -> Result<(), RepositoryError> {
        delete_row(&self.pool, "locations", id.value()).await
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn find_by_country(&self, iso_code: &str) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, version, name, address, facility
            FROM locations
            WHERE country_code = $1
            ORDER BY id
            "#,
        )
        .bind(iso_code.trim().to_ascii_uppercase())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("fetch locations"))?;

        rows.into_iter().map(Location::try_from).collect()
    }
}
