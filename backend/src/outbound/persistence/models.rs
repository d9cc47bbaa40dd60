//! Internal Diesel row types. Never exposed outside the persistence module.

use diesel::prelude::*;

use super::schema::{core_store, permissions, roles, seed_records};

/// Row struct for reading from the roles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: i64,
    pub name: String,
    pub role_type: String,
}

/// Row struct for reading from the permissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PermissionRow {
    pub id: i64,
    pub role_id: i64,
    pub permission_type: String,
    pub controller: String,
    pub action: String,
    pub enabled: bool,
}

/// Insertable struct for writing a setup flag.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = core_store)]
pub(crate) struct NewSetupFlagRow<'a> {
    pub environment: &'a str,
    pub namespace: &'a str,
    pub flag_key: &'a str,
    pub value: bool,
}

/// Insertable struct for a seeded content record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = seed_records)]
pub(crate) struct NewSeedRecordRow<'a> {
    pub resource: &'a str,
    pub payload: serde_json::Value,
}
