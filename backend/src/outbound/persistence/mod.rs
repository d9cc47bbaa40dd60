//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the bootstrap ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: database failures map onto the port error enums.
//!
//! # Example
//!
//! ```no_run
//! use userstory_backend::outbound::persistence::{DbPool, DieselSetupStore, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/userstory")).await?;
//! let store = DieselSetupStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_permission_repository;
mod diesel_role_repository;
mod diesel_seed_record_repository;
mod diesel_setup_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_permission_repository::DieselPermissionRepository;
pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_seed_record_repository::DieselSeedRecordRepository;
pub use diesel_setup_store::DieselSetupStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
