//! Bootstrap configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::RuntimeEnvironment;
use crate::domain::ports::{SETUP_NAMESPACE, SetupFlagKey};
use crate::outbound::persistence::PoolConfig;

/// Environment assumed when none is configured. It seeds nothing.
const DEFAULT_ENVIRONMENT: &str = "production";

fn default_seed_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("seed-data")
        .join("data.json")
}

/// Configuration values controlling the first-run bootstrap.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct BootstrapSettings {
    /// Runtime environment name (`test`, `development`, ...).
    pub env: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Optional seed document path override.
    pub seed_data_path: Option<PathBuf>,
    /// Optional setup store namespace override.
    pub store_namespace: Option<String>,
    /// Optional maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Optional connection checkout timeout, in seconds.
    pub pool_checkout_timeout_secs: Option<u64>,
    /// Clear the first-run flag before bootstrapping.
    #[ortho_config(default = false)]
    pub reset_first_run: bool,
}

impl BootstrapSettings {
    /// Return the runtime environment.
    ///
    /// An unset or blank name falls back to `production`, which seeds nothing;
    /// seeding only happens for an explicit `test` or `development`.
    pub fn environment(&self) -> RuntimeEnvironment {
        let name = self
            .env
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ENVIRONMENT);
        RuntimeEnvironment::new(name)
    }

    /// Return the configured seed document path, falling back to the default.
    pub fn seed_data_path(&self) -> PathBuf {
        self.seed_data_path
            .clone()
            .unwrap_or_else(default_seed_data_path)
    }

    /// Return the setup store namespace, falling back to `setup`.
    pub fn store_namespace(&self) -> &str {
        self.store_namespace.as_deref().unwrap_or(SETUP_NAMESPACE)
    }

    /// Key of the first-run flag for the configured environment.
    pub fn first_run_key(&self) -> SetupFlagKey {
        SetupFlagKey::init_has_run(self.environment().name(), self.store_namespace())
    }

    /// Pool configuration for `database_url` with the configured overrides.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let config = PoolConfig::new(database_url);
        let config = match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        };
        match self.pool_checkout_timeout_secs {
            Some(secs) => config.with_checkout_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}
