//! Domain types and services for the first-run bootstrap.
//!
//! Purpose: decide, exactly once per environment, to enable a fixed
//! whitelist of API permissions and to seed reference data. All store access
//! goes through the traits in [`ports`].
//!
//! Public surface:
//! - [`FirstRunGate`]: single-use trigger over the persisted `initHasRun` flag.
//! - [`PermissionPolicy`]: static whitelist per policy domain and role class.
//! - [`PermissionReconciler`]: enables whitelisted permission records.
//! - [`SeedDataLoader`]: inserts seed documents category by category.
//! - [`Bootstrapper`]: sequences the above for a runtime environment.

pub mod ports;

mod bootstrap;
mod first_run;
mod permission_policy;
mod permission_reconciler;
mod permissions;
mod roles;
mod runtime_environment;
mod seeding;

pub use self::bootstrap::{
    BootstrapError, BootstrapOutcome, Bootstrapper, InitializationSummary,
};
pub use self::first_run::{FirstRunError, FirstRunGate};
pub use self::permission_policy::{PermissionPolicy, PolicyRule};
pub use self::permission_reconciler::{
    PermissionReconciler, PermissionUpdateFailure, ReconciliationError, ReconciliationReport,
    TargetRoles, select_permissions_to_enable,
};
pub use self::permissions::{PermissionId, PermissionRecord, PolicyDomain};
pub use self::roles::{Role, RoleClass, RoleId, find_role_by_class};
pub use self::runtime_environment::{RuntimeEnvironment, SeedMode};
pub use self::seeding::{
    CategoryReport, SeedDataLoader, SeedInsertError, SeedInsertFailure, SeedReport,
};
