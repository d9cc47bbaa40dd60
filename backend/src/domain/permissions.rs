//! Permission records and the policy domains they belong to.

use std::fmt;

use super::RoleId;

/// Identifier of a stored permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw store identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grouping of controllers governed by one half of the permission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyDomain {
    /// Auth and user endpoints provided by the users-permissions plugin.
    Auth,
    /// Application collection endpoints.
    Application,
}

impl PolicyDomain {
    /// Permission `type` tag the store uses for records in this domain.
    pub const fn permission_type(self) -> &'static str {
        match self {
            Self::Auth => "users-permissions",
            Self::Application => "application",
        }
    }

    /// Map a stored permission `type` onto a policy domain.
    ///
    /// Other plugins (`upload`, `content-manager`, ...) have no policy domain.
    pub fn from_permission_type(permission_type: &str) -> Option<Self> {
        match permission_type {
            "users-permissions" => Some(Self::Auth),
            "application" => Some(Self::Application),
            _ => None,
        }
    }
}

impl fmt::Display for PolicyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => f.write_str("auth"),
            Self::Application => f.write_str("application"),
        }
    }
}

/// A stored (role, controller, action, enabled) tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRecord {
    /// Store identifier.
    pub id: PermissionId,
    /// Role owning the record.
    pub role: RoleId,
    /// Raw permission `type` as stored.
    pub permission_type: String,
    /// Controller or content type name.
    pub controller: String,
    /// Action name.
    pub action: String,
    /// Whether the role may call the action.
    pub enabled: bool,
}

impl PermissionRecord {
    /// Policy domain of this record, if it belongs to one.
    pub fn domain(&self) -> Option<PolicyDomain> {
        PolicyDomain::from_permission_type(&self.permission_type)
    }
}
