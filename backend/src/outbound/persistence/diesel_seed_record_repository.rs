//! PostgreSQL-backed `SeedRecordRepository` implementation using Diesel ORM.
//!
//! Records are stored as JSONB in `seed_records`, tagged with the content type
//! they were seeded for. Each create is its own statement; there is no batch
//! transaction.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use seed_data::{SeedCategory, SeedRecord};
use serde_json::Value;

use crate::domain::ports::{SeedRecordRepository, SeedRecordRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewSeedRecordRow;
use super::pool::{DbPool, PoolError};
use super::schema::seed_records;

/// Diesel-backed implementation of the `SeedRecordRepository` port.
#[derive(Clone)]
pub struct DieselSeedRecordRepository {
    pool: DbPool,
}

impl DieselSeedRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SeedRecordRepositoryError {
    map_basic_pool_error(error, SeedRecordRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SeedRecordRepositoryError {
    map_basic_diesel_error(
        error,
        SeedRecordRepositoryError::query,
        SeedRecordRepositoryError::connection,
    )
}

#[async_trait]
impl SeedRecordRepository for DieselSeedRecordRepository {
    async fn create_record(
        &self,
        category: SeedCategory,
        record: SeedRecord,
    ) -> Result<(), SeedRecordRepositoryError> {
        let row = NewSeedRecordRow {
            resource: category.resource_name(),
            payload: Value::Object(record.into_fields()),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(seed_records::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
