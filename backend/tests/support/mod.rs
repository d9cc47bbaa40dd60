//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module holds the role and permission catalogue they all start from, plus
//! the embedded PostgreSQL plumbing used by the Diesel suites.

use postgres::{Client, NoTls};
use userstory_backend::domain::{PermissionId, PermissionRecord, Role, RoleId};

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

/// Role of class authenticated.
pub const AUTHENTICATED_ROLE: RoleId = RoleId::new(1);
/// Role of class public.
pub const PUBLIC_ROLE: RoleId = RoleId::new(2);
/// A role outside both target classes.
pub const EDITOR_ROLE: RoleId = RoleId::new(3);

/// `(role, permission type, controller, action, enabled)` rows of the
/// catalogue; ids are assigned from 1 in row order.
const CATALOGUE: &[(RoleId, &str, &str, &str, bool)] = &[
    (PUBLIC_ROLE, "users-permissions", "auth", "register", false),
    (PUBLIC_ROLE, "users-permissions", "auth", "update", false),
    (PUBLIC_ROLE, "users-permissions", "user", "me", false),
    (PUBLIC_ROLE, "users-permissions", "user", "destroy", false),
    (PUBLIC_ROLE, "application", "product", "find", false),
    (PUBLIC_ROLE, "application", "product", "create", false),
    (PUBLIC_ROLE, "application", "user-story", "count", false),
    (PUBLIC_ROLE, "application", "successes", "find", true),
    (PUBLIC_ROLE, "upload", "upload", "upload", false),
    (AUTHENTICATED_ROLE, "users-permissions", "auth", "resetpassword", false),
    (AUTHENTICATED_ROLE, "users-permissions", "user", "update", false),
    (AUTHENTICATED_ROLE, "users-permissions", "user", "destroy", false),
    (AUTHENTICATED_ROLE, "application", "custom", "checkauthor", false),
    (AUTHENTICATED_ROLE, "application", "user-story", "create", false),
    (AUTHENTICATED_ROLE, "application", "user-story", "delete", false),
    (AUTHENTICATED_ROLE, "application", "product", "count", false),
    (EDITOR_ROLE, "application", "product", "find", false),
];

/// Build the public, authenticated and editor roles with their permissions.
pub fn sample_roles() -> Vec<Role> {
    let permissions: Vec<PermissionRecord> = CATALOGUE
        .iter()
        .zip(1_i64..)
        .map(
            |(&(role, permission_type, controller, action, enabled), id)| PermissionRecord {
                id: PermissionId::new(id),
                role,
                permission_type: permission_type.to_owned(),
                controller: controller.to_owned(),
                action: action.to_owned(),
                enabled,
            },
        )
        .collect();

    [
        Role::new(AUTHENTICATED_ROLE, "Authenticated", "authenticated"),
        Role::new(PUBLIC_ROLE, "Public", "public"),
        Role::new(EDITOR_ROLE, "Editor", "editor"),
    ]
    .into_iter()
    .map(|role| {
        let owned = permissions
            .iter()
            .filter(|permission| permission.role == role.id)
            .cloned()
            .collect();
        role.with_permissions(owned)
    })
    .collect()
}

/// Find the record for `controller.action` of `role` and `permission_type`.
pub fn find_permission<'a>(
    permissions: &'a [PermissionRecord],
    role: RoleId,
    permission_type: &str,
    controller: &str,
    action: &str,
) -> Option<&'a PermissionRecord> {
    permissions.iter().find(|permission| {
        permission.role == role
            && permission.permission_type == permission_type
            && permission.controller == controller
            && permission.action == action
    })
}

/// Records expected to be enabled after both domains are reconciled.
pub const EXPECTED_ENABLED: &[(RoleId, &str, &str, &str)] = &[
    (PUBLIC_ROLE, "users-permissions", "auth", "register"),
    (PUBLIC_ROLE, "users-permissions", "user", "me"),
    (PUBLIC_ROLE, "application", "product", "find"),
    (PUBLIC_ROLE, "application", "user-story", "count"),
    (PUBLIC_ROLE, "application", "successes", "find"),
    (AUTHENTICATED_ROLE, "users-permissions", "auth", "resetpassword"),
    (AUTHENTICATED_ROLE, "users-permissions", "user", "update"),
    (AUTHENTICATED_ROLE, "application", "custom", "checkauthor"),
    (AUTHENTICATED_ROLE, "application", "user-story", "create"),
];

/// Records expected to keep `enabled == false`.
pub const EXPECTED_DISABLED: &[(RoleId, &str, &str, &str)] = &[
    (PUBLIC_ROLE, "users-permissions", "auth", "update"),
    (PUBLIC_ROLE, "users-permissions", "user", "destroy"),
    (PUBLIC_ROLE, "application", "product", "create"),
    (PUBLIC_ROLE, "upload", "upload", "upload"),
    (AUTHENTICATED_ROLE, "users-permissions", "user", "destroy"),
    (AUTHENTICATED_ROLE, "application", "user-story", "delete"),
    (AUTHENTICATED_ROLE, "application", "product", "count"),
    (EDITOR_ROLE, "application", "product", "find"),
];

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Create an empty database named `name` through the `postgres` maintenance
/// database at `admin_url`.
pub fn create_database(admin_url: &str, name: &str) -> Result<(), String> {
    let mut client =
        Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))
}

/// Insert `roles` and their permission records with their identifiers.
pub fn insert_roles(url: &str, roles: &[Role]) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    for role in roles {
        client
            .execute(
                "INSERT INTO roles (id, name, role_type) VALUES ($1, $2, $3)",
                &[&role.id.as_i64(), &role.name, &role.role_type],
            )
            .map_err(|err| format_postgres_error(&err))?;
        for permission in &role.permissions {
            client
                .execute(
                    "INSERT INTO permissions \
                     (id, role_id, permission_type, controller, action, enabled) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                    &[
                        &permission.id.as_i64(),
                        &permission.role.as_i64(),
                        &permission.permission_type,
                        &permission.controller,
                        &permission.action,
                        &permission.enabled,
                    ],
                )
                .map_err(|err| format_postgres_error(&err))?;
        }
    }
    Ok(())
}
