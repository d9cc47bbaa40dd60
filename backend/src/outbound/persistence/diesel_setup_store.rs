//! PostgreSQL-backed `SetupStore` implementation using Diesel ORM.
//!
//! Flags live in the `core_store` table. Claiming a flag is one upsert whose
//! update branch only fires while the stored value is false, so two processes
//! racing on the same flag cannot both observe a successful claim.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{FlagClaim, SetupFlagKey, SetupStore, SetupStoreError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewSetupFlagRow;
use super::pool::{DbPool, PoolError};
use super::schema::core_store;

const CLAIM_FLAG_SQL: &str = "\
INSERT INTO core_store (environment, namespace, flag_key, value) \
VALUES ($1, $2, $3, TRUE) \
ON CONFLICT (environment, namespace, flag_key) \
DO UPDATE SET value = TRUE, updated_at = NOW() \
WHERE core_store.value = FALSE";

/// Diesel-backed implementation of the `SetupStore` port.
#[derive(Clone)]
pub struct DieselSetupStore {
    pool: DbPool,
}

impl DieselSetupStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SetupStoreError {
    map_basic_pool_error(error, SetupStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SetupStoreError {
    map_basic_diesel_error(error, SetupStoreError::query, SetupStoreError::connection)
}

fn claim_from_rows_affected(rows_affected: usize) -> FlagClaim {
    if rows_affected == 0 {
        FlagClaim::AlreadySet
    } else {
        FlagClaim::Claimed
    }
}

#[async_trait]
impl SetupStore for DieselSetupStore {
    async fn get_flag(&self, key: &SetupFlagKey) -> Result<Option<bool>, SetupStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        core_store::table
            .filter(core_store::environment.eq(key.environment()))
            .filter(core_store::namespace.eq(key.namespace()))
            .filter(core_store::flag_key.eq(key.key()))
            .select(core_store::value)
            .first::<bool>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn set_flag(&self, key: &SetupFlagKey, value: bool) -> Result<(), SetupStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSetupFlagRow {
            environment: key.environment(),
            namespace: key.namespace(),
            flag_key: key.key(),
            value,
        };

        diesel::insert_into(core_store::table)
            .values(&row)
            .on_conflict((
                core_store::environment,
                core_store::namespace,
                core_store::flag_key,
            ))
            .do_update()
            .set((
                core_store::value.eq(value),
                core_store::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn claim_flag(&self, key: &SetupFlagKey) -> Result<FlagClaim, SetupStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows_affected = diesel::sql_query(CLAIM_FLAG_SQL)
            .bind::<Text, _>(key.environment())
            .bind::<Text, _>(key.namespace())
            .bind::<Text, _>(key.key())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let claim = claim_from_rows_affected(rows_affected);
        debug!(
            environment = key.environment(),
            key = key.key(),
            ?claim,
            "setup flag claim executed"
        );
        Ok(claim)
    }
}
