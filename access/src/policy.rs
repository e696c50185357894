//! Access policy: role grants that do not come from the profile's role list.
//!
//! DESIGN
//! ======
//! Product rules such as "demo accounts may open the business dashboard" are
//! data, not code. Each rule names the role it grants and the predicate that
//! must hold for the user. The predicate set is closed so a typo in the
//! policy document fails at parse time.
//!
//! ```yaml
//! bypasses:
//!   - grants: business_admin
//!     when: demo_account
//! ```

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::identity::Identity;
use crate::role::{Role, RoleSet};

/// Condition on the user under which a bypass applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassPredicate {
    /// The profile is flagged as a demo account.
    DemoAccount,
}

impl BypassPredicate {
    #[must_use]
    pub fn holds_for(self, user: &Identity) -> bool {
        match self {
            Self::DemoAccount => user.is_demo,
        }
    }
}

/// Grants `grants` to any user for whom `when` holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBypass {
    pub grants: Role,
    pub when: BypassPredicate,
}

/// Allow-list of bypass rules. The default policy grants nothing extra.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessPolicy {
    #[serde(default)]
    pub bypasses: Vec<RoleBypass>,
}

impl AccessPolicy {
    /// Parse a YAML policy document.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Parse`] for malformed YAML, unknown roles or
    /// unknown predicates.
    pub fn from_yaml(raw: &str) -> Result<Self, PolicyError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Profile roles plus every role granted by a matching bypass.
    #[must_use]
    pub fn effective_roles(&self, user: &Identity) -> RoleSet {
        let mut roles = user.roles.clone();
        roles.extend(
            self.bypasses
                .iter()
                .filter(|bypass| bypass.when.holds_for(user))
                .map(|bypass| bypass.grants),
        );
        roles
    }

    /// Whether `user` satisfies a non-empty `required` list (any-of).
    /// An empty list is satisfied by every user.
    #[must_use]
    pub fn permits(&self, user: &Identity, required: &[Role]) -> bool {
        required.is_empty() || self.effective_roles(user).contains_any(required)
    }
}
