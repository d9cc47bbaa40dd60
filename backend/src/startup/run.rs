//! Startup bootstrap orchestration.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use seed_data::{SeedDataError, SeedDocument};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    PermissionRepository, RoleRepository, SeedRecordRepository, SetupStore,
};
use crate::domain::{
    BootstrapError, BootstrapOutcome, Bootstrapper, FirstRunError, FirstRunGate,
    InitializationSummary, PermissionReconciler, SeedDataLoader, SeedMode,
};
use crate::outbound::persistence::{
    DbPool, DieselPermissionRepository, DieselRoleRepository, DieselSeedRecordRepository,
    DieselSetupStore, MigrationError, PoolError, run_pending_migrations,
};
use crate::startup::config::BootstrapSettings;

/// Errors returned while executing the startup bootstrap.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Seed document could not be read.
    #[error("failed to read seed data at {path}: {source}")]
    SeedDataRead {
        /// Path to the seed document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed document parsing failed.
    #[error("seed data error: {0}")]
    SeedData(#[from] SeedDataError),
    /// Database pool could not be built.
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),
    /// Schema migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
    /// The first-run flag could not be reset.
    #[error("failed to reset first-run flag: {0}")]
    Reset(#[source] FirstRunError),
    /// The bootstrap could not start.
    #[error("bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),
}

/// Apply pending migrations and build a connection pool sized by `settings`.
///
/// # Errors
///
/// Returns [`StartupError::Migration`] or [`StartupError::Pool`].
pub async fn connect_database(
    settings: &BootstrapSettings,
    database_url: &str,
) -> Result<DbPool, StartupError> {
    let applied = run_pending_migrations(database_url).await?;
    let config = settings.pool_config(database_url);
    info!(
        applied,
        max_size = config.max_size(),
        checkout_timeout_secs = config.checkout_timeout().as_secs(),
        "database ready"
    );
    Ok(DbPool::new(config).await?)
}

/// Run the first-run bootstrap against PostgreSQL.
///
/// # Examples
///
/// ```rust,no_run
/// use userstory_backend::startup::{BootstrapSettings, connect_database, run_bootstrap_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = BootstrapSettings {
///     env: Some("test".to_owned()),
///     database_url: None,
///     seed_data_path: None,
///     store_namespace: None,
///     pool_max_size: Some(4),
///     pool_checkout_timeout_secs: None,
///     reset_first_run: false,
/// };
/// let pool = connect_database(&settings, "postgres://localhost/userstories").await?;
/// let outcome = run_bootstrap_on_startup(&settings, &pool).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// See [`run_bootstrap`].
pub async fn run_bootstrap_on_startup(
    settings: &BootstrapSettings,
    pool: &DbPool,
) -> Result<BootstrapOutcome, StartupError> {
    let roles = Arc::new(DieselRoleRepository::new(pool.clone()));
    run_bootstrap(
        settings,
        Arc::new(DieselSetupStore::new(pool.clone())),
        roles,
        Arc::new(DieselPermissionRepository::new(pool.clone())),
        Arc::new(DieselSeedRecordRepository::new(pool.clone())),
    )
    .await
}

/// Run the first-run bootstrap over the given stores.
///
/// The seed document is loaded before the first-run flag is claimed, so an
/// unreadable document leaves the flag untouched. A missing file is not an
/// error: seeding is skipped with a warning.
///
/// # Errors
///
/// Returns [`StartupError::SeedDataRead`] or [`StartupError::SeedData`] when
/// the seed document exists but cannot be loaded, [`StartupError::Reset`]
/// when a requested flag reset fails, and [`StartupError::Bootstrap`] when
/// the first-run flag cannot be checked.
pub async fn run_bootstrap<S, R, P, D>(
    settings: &BootstrapSettings,
    setup_store: Arc<S>,
    roles: Arc<R>,
    permissions: Arc<P>,
    seed_records: Arc<D>,
) -> Result<BootstrapOutcome, StartupError>
where
    S: SetupStore,
    R: RoleRepository,
    P: PermissionRepository,
    D: SeedRecordRepository,
{
    let environment = settings.environment();
    let gate = FirstRunGate::new(setup_store, settings.first_run_key());

    if settings.reset_first_run {
        gate.reset().await.map_err(StartupError::Reset)?;
        warn!(%environment, "first-run flag reset on request");
    }

    let document = match environment.seed_mode() {
        SeedMode::Skip => None,
        SeedMode::Full | SeedMode::StatusesOnly => {
            let path = settings.seed_data_path();
            match load_seed_document(&path) {
                Ok(document) => Some(document),
                Err(StartupError::SeedDataRead { source, .. })
                    if source.kind() == ErrorKind::NotFound =>
                {
                    warn!(path = %path.display(), "seed data file missing");
                    None
                }
                Err(err) => return Err(err),
            }
        }
    };

    let bootstrapper = Bootstrapper::new(
        gate,
        PermissionReconciler::new(Arc::clone(&roles), permissions),
        SeedDataLoader::new(seed_records, roles),
    );
    let outcome = bootstrapper.run(&environment, document.as_ref()).await?;

    match &outcome {
        BootstrapOutcome::AlreadyInitialized => {
            info!(%environment, "first-run bootstrap skipped; already initialized");
        }
        BootstrapOutcome::Initialized(summary) => log_summary(summary),
    }
    Ok(outcome)
}

fn log_summary(summary: &InitializationSummary) {
    let reports = [&summary.application_permissions, &summary.auth_permissions];
    for report in reports.into_iter().flatten() {
        info!(
            domain = %report.domain,
            considered = report.considered,
            enabled = report.enabled.len(),
            failed = report.failures.len(),
            "permission reconciliation summary"
        );
    }
    if let Some(seeding) = &summary.seeding {
        for category in &seeding.categories {
            info!(
                category = %category.category,
                created = category.created,
                failed = category.failures.len(),
                "seed summary"
            );
        }
    }
}

/// Read and parse a seed document through a capability-scoped directory.
///
/// # Errors
///
/// Returns [`StartupError::SeedDataRead`] when the file cannot be read and
/// [`StartupError::SeedData`] when it is not a valid seed document.
pub fn load_seed_document(path: &Path) -> Result<SeedDocument, StartupError> {
    let read_error = |source| StartupError::SeedDataRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            ErrorKind::InvalidInput,
            "seed data path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(read_error)?;
    Ok(SeedDocument::from_json(&contents)?)
}
