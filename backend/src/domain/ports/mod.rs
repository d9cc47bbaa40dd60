//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod permission_repository;
mod role_repository;
mod seed_record_repository;
mod setup_store;

#[cfg(test)]
pub use permission_repository::MockPermissionRepository;
pub use permission_repository::{
    FixturePermissionRepository, PermissionRepository, PermissionRepositoryError,
};
#[cfg(test)]
pub use role_repository::MockRoleRepository;
pub use role_repository::{FixtureRoleRepository, RoleRepository, RoleRepositoryError};
#[cfg(test)]
pub use seed_record_repository::MockSeedRecordRepository;
pub use seed_record_repository::{
    FixtureSeedRecordRepository, SeedRecordRepository, SeedRecordRepositoryError,
};
#[cfg(test)]
pub use setup_store::MockSetupStore;
pub use setup_store::{
    FixtureSetupStore, FlagClaim, INIT_HAS_RUN_KEY, SETUP_NAMESPACE, SetupFlagKey, SetupStore,
    SetupStoreError,
};
