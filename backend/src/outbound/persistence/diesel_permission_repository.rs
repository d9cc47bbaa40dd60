//! PostgreSQL-backed `PermissionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::PermissionId;
use crate::domain::ports::{PermissionRepository, PermissionRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::permissions;

/// Diesel-backed implementation of the `PermissionRepository` port.
#[derive(Clone)]
pub struct DieselPermissionRepository {
    pool: DbPool,
}

impl DieselPermissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PermissionRepositoryError {
    map_basic_pool_error(error, PermissionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PermissionRepositoryError {
    map_basic_diesel_error(
        error,
        PermissionRepositoryError::query,
        PermissionRepositoryError::connection,
    )
}

#[async_trait]
impl PermissionRepository for DieselPermissionRepository {
    async fn set_enabled(
        &self,
        id: PermissionId,
        enabled: bool,
    ) -> Result<(), PermissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows_affected = diesel::update(permissions::table.find(id.as_i64()))
            .set(permissions::enabled.eq(enabled))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if rows_affected == 0 {
            return Err(PermissionRepositoryError::not_found(id.as_i64()));
        }
        Ok(())
    }
}
