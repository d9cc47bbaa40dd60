//! PostgreSQL-backed `RoleRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RoleRepository, RoleRepositoryError};
use crate::domain::{PermissionId, PermissionRecord, Role, RoleId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{PermissionRow, RoleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{permissions, roles};

/// Diesel-backed implementation of the `RoleRepository` port.
///
/// Loads roles and their permissions with two queries and joins them in
/// memory.
#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoleRepositoryError {
    map_basic_pool_error(error, RoleRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RoleRepositoryError {
    map_basic_diesel_error(
        error,
        RoleRepositoryError::query,
        RoleRepositoryError::connection,
    )
}

fn row_to_permission(row: PermissionRow) -> PermissionRecord {
    PermissionRecord {
        id: PermissionId::new(row.id),
        role: RoleId::new(row.role_id),
        permission_type: row.permission_type,
        controller: row.controller,
        action: row.action,
        enabled: row.enabled,
    }
}

/// Attach permission rows to their roles, preserving role order.
fn assemble_roles(role_rows: Vec<RoleRow>, permission_rows: Vec<PermissionRow>) -> Vec<Role> {
    let mut by_role: HashMap<i64, Vec<PermissionRecord>> = HashMap::new();
    for row in permission_rows {
        by_role
            .entry(row.role_id)
            .or_default()
            .push(row_to_permission(row));
    }

    role_rows
        .into_iter()
        .map(|row| {
            let permissions = by_role.remove(&row.id).unwrap_or_default();
            Role::new(RoleId::new(row.id), row.name, row.role_type).with_permissions(permissions)
        })
        .collect()
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn list_roles(&self) -> Result<Vec<Role>, RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let role_rows: Vec<RoleRow> = roles::table
            .order(roles::id.asc())
            .select(RoleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let role_ids: Vec<i64> = role_rows.iter().map(|row| row.id).collect();

        let permission_rows: Vec<PermissionRow> = permissions::table
            .filter(permissions::role_id.eq_any(role_ids))
            .order(permissions::id.asc())
            .select(PermissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(assemble_roles(role_rows, permission_rows))
    }
}
