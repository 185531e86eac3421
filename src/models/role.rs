use serde::{Deserialize, Serialize};

/// Role held by a user within their organization.
///
/// Roles form a privilege order for organization management:
/// ADMIN > TEAM_MANAGER > MEMBER > GUEST. Every permission decision in the
/// crate goes through the predicates below rather than comparing variants at
/// the call site, so the meaning of each role is defined in exactly one place.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform-wide administrator. The only role that may activate or
    /// deactivate organizations, including organizations it does not belong to.
    Admin,
    /// Organization owner/manager. Full control over tasks and users of its
    /// own organization.
    TeamManager,
    /// Regular team member. May manage only tasks assigned to itself.
    Member,
    /// Read-only user served a reduced task field set.
    Guest,
}

impl Role {
    /// ADMIN or TEAM_MANAGER: may act on any task and any user within the
    /// organization.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin | Role::TeamManager)
    }

    /// ADMIN only: cross-organization capabilities.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// GUEST: read-only, restricted field set, may never mutate tasks.
    pub fn is_guest(self) -> bool {
        matches!(self, Role::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_predicates() {
        assert!(Role::Admin.is_privileged());
        assert!(Role::TeamManager.is_privileged());
        assert!(!Role::Member.is_privileged());
        assert!(!Role::Guest.is_privileged());

        assert!(Role::Admin.is_admin());
        assert!(!Role::TeamManager.is_admin());

        assert!(Role::Guest.is_guest());
        assert!(!Role::Member.is_guest());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::TeamManager).unwrap(),
            "\"TEAM_MANAGER\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"GUEST\"").unwrap(),
            Role::Guest
        );
    }
}
