//! Authenticated user identity as seen by the access layer.

use serde::{Deserialize, Serialize};

use crate::role::RoleSet;

/// The current user, resolved from the provider's user record and profile row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider user id (UUID string).
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Roles granted by the profile row.
    #[serde(default)]
    pub roles: RoleSet,
    /// Demo accounts may be granted extra areas through the access policy.
    #[serde(default)]
    pub is_demo: bool,
}

impl Identity {
    /// Name for greetings and the navigation bar.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("there")
    }
}
