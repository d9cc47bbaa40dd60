//! Static whitelist of permissions enabled on first run.
//!
//! The controller and action names are defined by the API framework and must
//! match the stored permission records exactly.

use super::{PolicyDomain, RoleClass};

/// Allowed actions for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyRule {
    /// Controller or content type name.
    pub controller: &'static str,
    /// Actions the role may call on the controller.
    pub actions: &'static [&'static str],
}

const fn rule(controller: &'static str, actions: &'static [&'static str]) -> PolicyRule {
    PolicyRule {
        controller,
        actions,
    }
}

const READ_WITH_COUNT: &[&str] = &["count", "find", "findone"];
const READ: &[&str] = &["find", "findone"];

const AUTH_PUBLIC: &[PolicyRule] = &[
    rule(
        "auth",
        &[
            "callback",
            "connect",
            "emailconfirmation",
            "forgotpassword",
            "register",
        ],
    ),
    rule("user", &["find", "findone", "me"]),
];

const AUTH_AUTHENTICATED: &[PolicyRule] = &[
    rule(
        "auth",
        &[
            "callback",
            "connect",
            "forgotpassword",
            "register",
            "resetpassword",
        ],
    ),
    rule("user", &["find", "findone", "me", "update"]),
];

const APPLICATION_PUBLIC: &[PolicyRule] = &[
    rule("user-story-notification", READ_WITH_COUNT),
    rule("user-story-comment", READ_WITH_COUNT),
    rule("user-story-status", READ_WITH_COUNT),
    rule("user-story-policy", READ_WITH_COUNT),
    rule("product", READ_WITH_COUNT),
    rule("successes", READ),
    rule("user-story-comment-thread", READ_WITH_COUNT),
    rule("user-story", READ_WITH_COUNT),
];

const APPLICATION_AUTHENTICATED: &[PolicyRule] = &[
    rule("user-story-notification", &["find", "findone", "update"]),
    rule(
        "user-story-comment",
        &["find", "findone", "update", "create"],
    ),
    rule("user-story-status", READ),
    rule("user-story-policy", READ),
    rule("product", READ),
    rule("custom", &["checkauthor"]),
    rule("successes", READ),
    rule("user-story-comment-thread", READ),
    rule(
        "user-story",
        &["count", "find", "findone", "create", "update"],
    ),
];

/// Lookup over the first-run permission whitelist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionPolicy;

impl PermissionPolicy {
    /// Rules applying to `class` within `domain`.
    pub const fn rules(domain: PolicyDomain, class: RoleClass) -> &'static [PolicyRule] {
        match (domain, class) {
            (PolicyDomain::Auth, RoleClass::Public) => AUTH_PUBLIC,
            (PolicyDomain::Auth, RoleClass::Authenticated) => AUTH_AUTHENTICATED,
            (PolicyDomain::Application, RoleClass::Public) => APPLICATION_PUBLIC,
            (PolicyDomain::Application, RoleClass::Authenticated) => APPLICATION_AUTHENTICATED,
        }
    }

    /// Actions allowed on `controller`, or `None` when the controller is not
    /// listed for this role class and domain.
    pub fn allowed_actions(
        domain: PolicyDomain,
        class: RoleClass,
        controller: &str,
    ) -> Option<&'static [&'static str]> {
        Self::rules(domain, class)
            .iter()
            .find(|rule| rule.controller == controller)
            .map(|rule| rule.actions)
    }

    /// Whether the whitelist enables `controller.action` for the role class.
    ///
    /// # Examples
    ///
    /// ```
    /// use userstory_backend::domain::{PermissionPolicy, PolicyDomain, RoleClass};
    ///
    /// assert!(PermissionPolicy::allows(PolicyDomain::Auth, RoleClass::Public, "auth", "register"));
    /// assert!(!PermissionPolicy::allows(PolicyDomain::Auth, RoleClass::Public, "auth", "update"));
    /// ```
    pub fn allows(domain: PolicyDomain, class: RoleClass, controller: &str, action: &str) -> bool {
        Self::allowed_actions(domain, class, controller)
            .is_some_and(|actions| actions.iter().any(|allowed| *allowed == action))
    }
}
