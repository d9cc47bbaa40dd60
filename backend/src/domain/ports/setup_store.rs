//! Port abstraction for the persisted setup flags.
//!
//! The store keeps small boolean flags keyed by environment, namespace and
//! key. The first-run gate relies on [`SetupStore::claim_flag`] being a single
//! atomic compare-and-set so that concurrent process starts cannot both claim
//! initialization.

use async_trait::async_trait;

use super::define_port_error;

/// Namespace holding bootstrap flags.
pub const SETUP_NAMESPACE: &str = "setup";

/// Key of the flag recording that first-run initialization was claimed.
pub const INIT_HAS_RUN_KEY: &str = "initHasRun";

define_port_error! {
    /// Persistence errors raised by setup store adapters.
    pub enum SetupStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "setup store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "setup store query failed: {message}",
    }
}

/// Fully qualified flag location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetupFlagKey {
    environment: String,
    namespace: String,
    key: String,
}

impl SetupFlagKey {
    /// Build a key from its three parts.
    pub fn new(
        environment: impl Into<String>,
        namespace: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// The `initHasRun` flag for an environment in the given namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use userstory_backend::domain::ports::{SETUP_NAMESPACE, SetupFlagKey};
    ///
    /// let key = SetupFlagKey::init_has_run("test", SETUP_NAMESPACE);
    /// assert_eq!(key.key(), "initHasRun");
    /// assert_eq!(key.environment(), "test");
    /// ```
    pub fn init_has_run(environment: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::new(environment, namespace, INIT_HAS_RUN_KEY)
    }

    /// Environment scope of the flag.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Namespace of the flag.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Flag name.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Result of attempting to claim a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagClaim {
    /// The flag was absent or false and is now true.
    Claimed,
    /// The flag was already true.
    AlreadySet,
}

/// Port for reading and writing setup flags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SetupStore: Send + Sync {
    /// Read a flag; `None` when it has never been written.
    async fn get_flag(&self, key: &SetupFlagKey) -> Result<Option<bool>, SetupStoreError>;

    /// Overwrite a flag.
    async fn set_flag(&self, key: &SetupFlagKey, value: bool) -> Result<(), SetupStoreError>;

    /// Atomically set a flag to `true`, reporting whether it was previously
    /// absent or false.
    ///
    /// Implementations must perform the read and write as one operation.
    async fn claim_flag(&self, key: &SetupFlagKey) -> Result<FlagClaim, SetupStoreError>;
}

/// Test fixture implementation that never remembers a flag.
#[derive(Debug, Default, Clone)]
pub struct FixtureSetupStore;

#[async_trait]
impl SetupStore for FixtureSetupStore {
    async fn get_flag(&self, _key: &SetupFlagKey) -> Result<Option<bool>, SetupStoreError> {
        Ok(None)
    }

    async fn set_flag(&self, _key: &SetupFlagKey, _value: bool) -> Result<(), SetupStoreError> {
        Ok(())
    }

    async fn claim_flag(&self, _key: &SetupFlagKey) -> Result<FlagClaim, SetupStoreError> {
        Ok(FlagClaim::Claimed)
    }
}
