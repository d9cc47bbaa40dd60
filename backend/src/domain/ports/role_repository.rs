//! Port abstraction for reading roles and their permission records.

use async_trait::async_trait;

use crate::domain::Role;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by role repository adapters.
    pub enum RoleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "role repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "role repository query failed: {message}",
    }
}

/// Port for listing the roles known to the users-permissions store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Return every role with its permission records attached.
    async fn list_roles(&self) -> Result<Vec<Role>, RoleRepositoryError>;
}

/// Test fixture implementation with no roles.
#[derive(Debug, Default, Clone)]
pub struct FixtureRoleRepository;

#[async_trait]
impl RoleRepository for FixtureRoleRepository {
    async fn list_roles(&self) -> Result<Vec<Role>, RoleRepositoryError> {
        Ok(Vec::new())
    }
}
