//! Role tags and role sets.
//!
//! DESIGN
//! ======
//! Roles form a closed enum so an unknown tag is rejected when profile data
//! is decoded instead of silently failing every access check later.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A tag granting access to a role-specific area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Instructor,
    BusinessAdmin,
    Admin,
    SuperAdmin,
    Employee,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Student,
        Role::Instructor,
        Role::BusinessAdmin,
        Role::Admin,
        Role::SuperAdmin,
        Role::Employee,
    ];

    /// Wire tag as stored in profile rows and query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::BusinessAdmin => "business_admin",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Employee => "employee",
        }
    }

    /// Label shown in the account-type selector and navigation.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Instructor => "Instructor",
            Self::BusinessAdmin => "Business",
            Self::Admin => "Administrator",
            Self::SuperAdmin => "Super administrator",
            Self::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// Ordered set of roles held by a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// True if at least one of `required` is held. An empty `required`
    /// slice never matches; callers decide what "no roles" means.
    #[must_use]
    pub fn contains_any(&self, required: &[Role]) -> bool {
        required.iter().any(|role| self.0.contains(role))
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Parse role tags, skipping (and logging) unknown ones.
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for tag in tags {
            match tag.parse::<Role>() {
                Ok(role) => {
                    set.insert(role);
                }
                Err(e) => log::warn!("ignoring {e}"),
            }
        }
        set
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
