//! First-run bootstrap orchestration.
//!
//! Sequence: claim the first-run flag, reconcile application permissions,
//! reconcile auth permissions, then seed according to the runtime
//! environment. Once the flag is claimed every step runs; sub-step failures
//! are logged and returned in the summary rather than aborting the run.

use seed_data::SeedDocument;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::ports::{
    PermissionRepository, RoleRepository, SeedRecordRepository, SetupStore,
};
use crate::domain::{
    FirstRunError, FirstRunGate, PermissionReconciler, PolicyDomain, ReconciliationError,
    ReconciliationReport, RuntimeEnvironment, SeedDataLoader, SeedMode, SeedReport,
};

/// Errors that prevent the bootstrap from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The first-run flag could not be checked.
    #[error(transparent)]
    FirstRun(#[from] FirstRunError),
}

/// Results of an initialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationSummary {
    /// Application-domain reconciliation.
    pub application_permissions: Result<ReconciliationReport, ReconciliationError>,
    /// Auth-domain reconciliation.
    pub auth_permissions: Result<ReconciliationReport, ReconciliationError>,
    /// Seeding selected by the environment.
    pub seed_mode: SeedMode,
    /// Seed results, when seeding ran.
    pub seeding: Option<SeedReport>,
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The flag was already claimed; nothing ran.
    AlreadyInitialized,
    /// First run: initialization ran.
    Initialized(InitializationSummary),
}

/// Orchestrates the first-run bootstrap.
#[derive(Clone)]
pub struct Bootstrapper<S, R, P, D> {
    gate: FirstRunGate<S>,
    reconciler: PermissionReconciler<R, P>,
    seeder: SeedDataLoader<D, R>,
}

impl<S, R, P, D> Bootstrapper<S, R, P, D> {
    /// Assemble a bootstrapper from its components.
    pub fn new(
        gate: FirstRunGate<S>,
        reconciler: PermissionReconciler<R, P>,
        seeder: SeedDataLoader<D, R>,
    ) -> Self {
        Self {
            gate,
            reconciler,
            seeder,
        }
    }
}

impl<S, R, P, D> Bootstrapper<S, R, P, D>
where
    S: SetupStore,
    R: RoleRepository,
    P: PermissionRepository,
    D: SeedRecordRepository,
{
    /// Run the bootstrap once for `environment`.
    ///
    /// `seed_data` is only read when the environment seeds; when it is
    /// required but absent, seeding is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::FirstRun`] when the first-run flag cannot be
    /// checked. Nothing else runs in that case.
    pub async fn run(
        &self,
        environment: &RuntimeEnvironment,
        seed_data: Option<&SeedDocument>,
    ) -> Result<BootstrapOutcome, BootstrapError> {
        if !self.gate.should_initialize().await? {
            info!(%environment, "bootstrap already ran; skipping");
            return Ok(BootstrapOutcome::AlreadyInitialized);
        }

        info!(%environment, "running first-run bootstrap");
        let application_permissions = self.reconcile(PolicyDomain::Application).await;
        let auth_permissions = self.reconcile(PolicyDomain::Auth).await;

        let seed_mode = environment.seed_mode();
        let seeding = match (seed_mode, seed_data) {
            (SeedMode::Skip, _) => None,
            (_, None) => {
                warn!(%environment, ?seed_mode, "seed data unavailable; skipping seeding");
                None
            }
            (SeedMode::Full, Some(document)) => Some(self.seeder.seed_all(document).await),
            (SeedMode::StatusesOnly, Some(document)) => {
                Some(self.seeder.seed_statuses_only(document).await)
            }
        };

        info!(%environment, ?seed_mode, "first-run bootstrap finished");
        Ok(BootstrapOutcome::Initialized(InitializationSummary {
            application_permissions,
            auth_permissions,
            seed_mode,
            seeding,
        }))
    }

    async fn reconcile(
        &self,
        domain: PolicyDomain,
    ) -> Result<ReconciliationReport, ReconciliationError> {
        let result = self.reconciler.reconcile(domain).await;
        if let Err(err) = &result {
            error!(%domain, error = %err, "permission reconciliation failed");
        }
        result
    }
}
