//! Roles exposed by the users-permissions store.

use std::fmt;

use super::PermissionRecord;

/// Identifier of a stored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(i64);

impl RoleId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw store identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse category of an API consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleClass {
    /// Unauthenticated callers.
    Public,
    /// Callers holding a valid session.
    Authenticated,
}

impl RoleClass {
    /// Role `type` string used by the store for this class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
        }
    }

    /// Map a stored role `type` onto a class.
    ///
    /// Custom roles created by administrators have other types and map to
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use userstory_backend::domain::RoleClass;
    ///
    /// assert_eq!(RoleClass::from_role_type("public"), Some(RoleClass::Public));
    /// assert_eq!(RoleClass::from_role_type("editor"), None);
    /// ```
    pub fn from_role_type(role_type: &str) -> Option<Self> {
        match role_type {
            "public" => Some(Self::Public),
            "authenticated" => Some(Self::Authenticated),
            _ => None,
        }
    }
}

impl fmt::Display for RoleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored role together with the permission records attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Store identifier.
    pub id: RoleId,
    /// Human readable name, e.g. `Public`.
    pub name: String,
    /// Raw role `type` as stored.
    pub role_type: String,
    /// Permission records owned by this role.
    pub permissions: Vec<PermissionRecord>,
}

impl Role {
    /// Build a role without permissions.
    pub fn new(id: RoleId, name: impl Into<String>, role_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role_type: role_type.into(),
            permissions: Vec::new(),
        }
    }

    /// Attach permission records to this role.
    pub fn with_permissions(mut self, permissions: Vec<PermissionRecord>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Role class derived from the stored type, if any.
    pub fn class(&self) -> Option<RoleClass> {
        RoleClass::from_role_type(&self.role_type)
    }
}

/// Return the first role of the given class.
pub fn find_role_by_class(roles: &[Role], class: RoleClass) -> Option<&Role> {
    roles.iter().find(|role| role.class() == Some(class))
}
