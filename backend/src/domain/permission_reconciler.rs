//! Additive reconciliation of stored permissions against the first-run
//! whitelist.
//!
//! Reconciliation only ever flips records to enabled. Records outside the
//! whitelist, or belonging to roles other than the public and authenticated
//! roles, are never touched.

use std::sync::Arc;

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    PermissionRepository, PermissionRepositoryError, RoleRepository, RoleRepositoryError,
};
use crate::domain::{
    PermissionId, PermissionPolicy, PermissionRecord, PolicyDomain, Role, RoleClass,
    find_role_by_class,
};

/// Errors that abort reconciliation of a whole domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// A required role is missing from the store.
    #[error("no role of class '{class}' exists")]
    RoleNotFound {
        /// Role class that could not be found.
        class: RoleClass,
    },
    /// Roles could not be listed.
    #[error("failed to list roles: {0}")]
    RoleListing(#[from] RoleRepositoryError),
}

/// A permission update that failed; the remaining updates still ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUpdateFailure {
    /// Record that could not be enabled.
    pub permission_id: PermissionId,
    /// Error returned by the store.
    pub error: PermissionRepositoryError,
}

/// Outcome of reconciling one policy domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Domain that was reconciled.
    pub domain: PolicyDomain,
    /// Number of records of the two target roles inside the domain.
    pub considered: usize,
    /// Records successfully set to enabled.
    pub enabled: Vec<PermissionId>,
    /// Records whose update failed.
    pub failures: Vec<PermissionUpdateFailure>,
}

impl ReconciliationReport {
    /// Whether every selected update succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The two roles reconciliation applies to.
#[derive(Debug, Clone, Copy)]
pub struct TargetRoles<'a> {
    /// Role of class public.
    pub public: &'a Role,
    /// Role of class authenticated.
    pub authenticated: &'a Role,
}

impl<'a> TargetRoles<'a> {
    /// Select the public and authenticated roles from a role listing.
    ///
    /// # Errors
    ///
    /// Returns [`ReconciliationError::RoleNotFound`] naming the first missing
    /// class.
    pub fn select(roles: &'a [Role]) -> Result<Self, ReconciliationError> {
        let find = |class| {
            find_role_by_class(roles, class).ok_or(ReconciliationError::RoleNotFound { class })
        };
        Ok(Self {
            public: find(RoleClass::Public)?,
            authenticated: find(RoleClass::Authenticated)?,
        })
    }

    /// Class of the role owning `permission`, if it is one of the targets.
    fn class_of(&self, permission: &PermissionRecord) -> Option<RoleClass> {
        if permission.role == self.public.id {
            Some(RoleClass::Public)
        } else if permission.role == self.authenticated.id {
            Some(RoleClass::Authenticated)
        } else {
            None
        }
    }

    fn permissions(&self) -> impl Iterator<Item = &'a PermissionRecord> {
        self.public
            .permissions
            .iter()
            .chain(self.authenticated.permissions.iter())
    }
}

/// Select the records of the target roles that the whitelist enables in
/// `domain`.
///
/// Returns the number of target records inside the domain alongside the
/// selected records. Already-enabled records are selected too, so the same
/// updates are issued on every run.
pub fn select_permissions_to_enable<'a>(
    domain: PolicyDomain,
    targets: &TargetRoles<'a>,
) -> (usize, Vec<&'a PermissionRecord>) {
    let in_domain: Vec<&PermissionRecord> = targets
        .permissions()
        .filter(|permission| permission.domain() == Some(domain))
        .collect();
    let considered = in_domain.len();
    let selected = in_domain
        .into_iter()
        .filter(|permission| {
            targets.class_of(permission).is_some_and(|class| {
                PermissionPolicy::allows(domain, class, &permission.controller, &permission.action)
            })
        })
        .collect();
    (considered, selected)
}

/// Service enabling whitelisted permissions for the public and authenticated
/// roles.
#[derive(Clone)]
pub struct PermissionReconciler<R, P> {
    roles: Arc<R>,
    permissions: Arc<P>,
}

impl<R, P> PermissionReconciler<R, P> {
    /// Create a reconciler over the given role and permission stores.
    pub fn new(roles: Arc<R>, permissions: Arc<P>) -> Self {
        Self { roles, permissions }
    }
}

impl<R, P> PermissionReconciler<R, P>
where
    R: RoleRepository,
    P: PermissionRepository,
{
    /// Enable every whitelisted permission of the public and authenticated
    /// roles in `domain`.
    ///
    /// Updates run concurrently. A failed update is logged and reported in
    /// [`ReconciliationReport::failures`] without aborting the others.
    ///
    /// # Errors
    ///
    /// Returns [`ReconciliationError`] when roles cannot be listed or one of
    /// the two target roles is missing; no update is issued in that case.
    pub async fn reconcile(
        &self,
        domain: PolicyDomain,
    ) -> Result<ReconciliationReport, ReconciliationError> {
        let roles = self.roles.list_roles().await?;
        let targets = TargetRoles::select(&roles)?;
        let (considered, selected) = select_permissions_to_enable(domain, &targets);

        let updates = selected.iter().map(|permission| {
            let id = permission.id;
            async move { (id, self.permissions.set_enabled(id, true).await) }
        });

        let mut enabled = Vec::with_capacity(selected.len());
        let mut failures = Vec::new();
        for (permission_id, result) in join_all(updates).await {
            match result {
                Ok(()) => enabled.push(permission_id),
                Err(error) => {
                    warn!(
                        %domain,
                        %permission_id,
                        error = %error,
                        "failed to enable permission"
                    );
                    failures.push(PermissionUpdateFailure {
                        permission_id,
                        error,
                    });
                }
            }
        }

        info!(
            %domain,
            considered,
            enabled = enabled.len(),
            failed = failures.len(),
            "permissions reconciled"
        );

        Ok(ReconciliationReport {
            domain,
            considered,
            enabled,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for permission reconciliation.

    use super::*;
    use crate::domain::RoleId;
    use crate::domain::ports::{
        FixturePermissionRepository, MockPermissionRepository, MockRoleRepository,
    };
    use rstest::{fixture, rstest};

    const PUBLIC: RoleId = RoleId::new(2);
    const AUTHENTICATED: RoleId = RoleId::new(1);

    fn permission(
        id: i64,
        role: RoleId,
        permission_type: &str,
        controller: &str,
        action: &str,
    ) -> PermissionRecord {
        PermissionRecord {
            id: PermissionId::new(id),
            role,
            permission_type: permission_type.to_owned(),
            controller: controller.to_owned(),
            action: action.to_owned(),
            enabled: false,
        }
    }

    #[fixture]
    fn roles() -> Vec<Role> {
        vec![
            Role::new(AUTHENTICATED, "Authenticated", "authenticated").with_permissions(vec![
                permission(10, AUTHENTICATED, "users-permissions", "auth", "resetpassword"),
                permission(11, AUTHENTICATED, "users-permissions", "user", "update"),
                permission(12, AUTHENTICATED, "users-permissions", "user", "destroy"),
                permission(13, AUTHENTICATED, "application", "user-story", "create"),
                permission(14, AUTHENTICATED, "application", "custom", "checkauthor"),
            ]),
            Role::new(PUBLIC, "Public", "public").with_permissions(vec![
                permission(20, PUBLIC, "users-permissions", "auth", "register"),
                permission(21, PUBLIC, "users-permissions", "auth", "update"),
                permission(22, PUBLIC, "users-permissions", "auth", "resetpassword"),
                permission(23, PUBLIC, "application", "user-story", "count"),
                permission(24, PUBLIC, "application", "user-story", "create"),
                permission(25, PUBLIC, "upload", "upload", "upload"),
            ]),
        ]
    }

    fn ids(records: &[&PermissionRecord]) -> Vec<i64> {
        let mut ids: Vec<i64> = records.iter().map(|record| record.id.as_i64()).collect();
        ids.sort_unstable();
        ids
    }

    #[rstest]
    #[case::auth(PolicyDomain::Auth, 6, vec![10, 11, 20])]
    #[case::application(PolicyDomain::Application, 4, vec![13, 14, 23])]
    fn selection_follows_the_whitelist(
        roles: Vec<Role>,
        #[case] domain: PolicyDomain,
        #[case] expected_considered: usize,
        #[case] expected_ids: Vec<i64>,
    ) {
        let targets = TargetRoles::select(&roles).expect("both roles present");
        let (considered, selected) = select_permissions_to_enable(domain, &targets);

        assert_eq!(considered, expected_considered);
        assert_eq!(ids(&selected), expected_ids);
    }

    #[rstest]
    fn records_of_other_roles_are_ignored(mut roles: Vec<Role>) {
        let editor = RoleId::new(9);
        if let Some(public) = roles.get_mut(1) {
            public
                .permissions
                .push(permission(30, editor, "users-permissions", "auth", "register"));
        }

        let targets = TargetRoles::select(&roles).expect("both roles present");
        let (_, selected) = select_permissions_to_enable(PolicyDomain::Auth, &targets);

        assert!(!ids(&selected).contains(&30));
    }

    #[rstest]
    #[case::public_missing("public", RoleClass::Public)]
    #[case::authenticated_missing("authenticated", RoleClass::Authenticated)]
    fn missing_role_is_reported(
        roles: Vec<Role>,
        #[case] removed_type: &str,
        #[case] expected: RoleClass,
    ) {
        let remaining: Vec<Role> = roles
            .into_iter()
            .filter(|role| role.role_type != removed_type)
            .collect();

        let error = TargetRoles::select(&remaining).expect_err("role should be missing");
        assert_eq!(error, ReconciliationError::RoleNotFound { class: expected });
    }

    #[rstest]
    #[tokio::test]
    async fn reconcile_enables_selected_records(roles: Vec<Role>) {
        let mut role_repo = MockRoleRepository::new();
        role_repo
            .expect_list_roles()
            .times(1)
            .return_once(move || Ok(roles));
        let mut permission_repo = MockPermissionRepository::new();
        permission_repo
            .expect_set_enabled()
            .withf(|id, enabled| *enabled && [10, 11, 20].contains(&id.as_i64()))
            .times(3)
            .returning(|_, _| Ok(()));

        let reconciler = PermissionReconciler::new(Arc::new(role_repo), Arc::new(permission_repo));
        let report = reconciler
            .reconcile(PolicyDomain::Auth)
            .await
            .expect("reconciliation succeeds");

        let mut enabled: Vec<i64> = report.enabled.iter().map(|id| id.as_i64()).collect();
        enabled.sort_unstable();
        assert_eq!(enabled, vec![10, 11, 20]);
        assert!(report.is_complete());
        assert_eq!(report.domain, PolicyDomain::Auth);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_update_does_not_abort_the_rest(roles: Vec<Role>) {
        let mut role_repo = MockRoleRepository::new();
        role_repo
            .expect_list_roles()
            .return_once(move || Ok(roles));
        let mut permission_repo = MockPermissionRepository::new();
        permission_repo
            .expect_set_enabled()
            .times(3)
            .returning(|id, _| {
                if id.as_i64() == 13 {
                    Err(PermissionRepositoryError::query("deadlock detected"))
                } else {
                    Ok(())
                }
            });

        let reconciler = PermissionReconciler::new(Arc::new(role_repo), Arc::new(permission_repo));
        let report = reconciler
            .reconcile(PolicyDomain::Application)
            .await
            .expect("partial success is not an error");

        assert_eq!(report.enabled.len(), 2);
        assert_eq!(
            report.failures,
            vec![PermissionUpdateFailure {
                permission_id: PermissionId::new(13),
                error: PermissionRepositoryError::query("deadlock detected"),
            }]
        );
        assert!(!report.is_complete());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_role_aborts_before_any_update(roles: Vec<Role>) {
        let only_public: Vec<Role> = roles
            .into_iter()
            .filter(|role| role.class() == Some(RoleClass::Public))
            .collect();
        let mut role_repo = MockRoleRepository::new();
        role_repo
            .expect_list_roles()
            .return_once(move || Ok(only_public));
        let mut permission_repo = MockPermissionRepository::new();
        permission_repo.expect_set_enabled().times(0);

        let reconciler = PermissionReconciler::new(Arc::new(role_repo), Arc::new(permission_repo));
        let error = reconciler
            .reconcile(PolicyDomain::Auth)
            .await
            .expect_err("authenticated role is missing");

        assert_eq!(
            error,
            ReconciliationError::RoleNotFound {
                class: RoleClass::Authenticated
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn role_listing_failure_is_surfaced() {
        let mut role_repo = MockRoleRepository::new();
        role_repo
            .expect_list_roles()
            .return_once(|| Err(RoleRepositoryError::connection("refused")));

        let reconciler =
            PermissionReconciler::new(Arc::new(role_repo), Arc::new(FixturePermissionRepository));
        let error = reconciler
            .reconcile(PolicyDomain::Application)
            .await
            .expect_err("listing failure aborts");

        assert!(matches!(error, ReconciliationError::RoleListing(_)));
    }
}
