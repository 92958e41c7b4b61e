//! User domain model with role capabilities.
//!
//! A single `User` record carries a set of role capabilities. Capability
//! checks are plain predicates over that set; there is no role hierarchy
//! and no subtyping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::UNSET_ID;

/// Capability granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ground and chase crew duty.
    Crew,
    /// Licensed to command a flight.
    Pilot,
    /// Operations administration.
    Admin,
}

/// A member of the flight operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Persistence identifier; [`UNSET_ID`] until the entity is stored.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Granted role capabilities.
    pub roles: BTreeSet<Role>,
}

impl User {
    /// Create a new, not-yet-persisted user with no roles.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSET_ID.to_string(),
            name: name.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Create a user with a known identifier and role set.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, roles: BTreeSet<Role>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roles,
        }
    }

    /// Grant a role, returning self for chained construction.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Check whether the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the user may command a flight.
    #[must_use]
    pub fn can_fly(&self) -> bool {
        self.has_role(Role::Pilot)
    }

    /// Whether the user may administer the operation.
    #[must_use]
    pub fn can_administrate(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_roles() {
        let user = User::new("Ada");
        assert_eq!(user.id, UNSET_ID);
        assert!(user.roles.is_empty());
        assert!(!user.can_fly());
        assert!(!user.can_administrate());
    }

    #[test]
    fn test_role_predicates() {
        let user = User::new("Bert").with_role(Role::Pilot).with_role(Role::Crew);
        assert!(user.can_fly());
        assert!(user.has_role(Role::Crew));
        assert!(!user.can_administrate());
    }

    #[test]
    fn test_roles_are_a_set() {
        let user = User::new("Cleo").with_role(Role::Admin).with_role(Role::Admin);
        assert_eq!(user.roles.len(), 1);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Pilot).unwrap();
        assert_eq!(json, "\"pilot\"");
    }
}
