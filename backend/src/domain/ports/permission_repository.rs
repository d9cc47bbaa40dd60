//! Port abstraction for updating permission records.

use async_trait::async_trait;

use crate::domain::PermissionId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by permission repository adapters.
    pub enum PermissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "permission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "permission repository query failed: {message}",
        /// The record to update does not exist.
        NotFound { id: i64 } => "permission {id} not found",
    }
}

/// Port for mutating permission records.
///
/// Updates are blind overwrites of the `enabled` field; concurrent writers to
/// the same record are serialized by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Set the `enabled` flag of one permission record.
    async fn set_enabled(
        &self,
        id: PermissionId,
        enabled: bool,
    ) -> Result<(), PermissionRepositoryError>;
}

/// Test fixture implementation that accepts every update.
#[derive(Debug, Default, Clone)]
pub struct FixturePermissionRepository;

#[async_trait]
impl PermissionRepository for FixturePermissionRepository {
    async fn set_enabled(
        &self,
        _id: PermissionId,
        _enabled: bool,
    ) -> Result<(), PermissionRepositoryError> {
        Ok(())
    }
}
