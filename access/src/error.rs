//! Error types shared across the access layer.
//!
//! ERROR HANDLING
//! ==============
//! Authentication and authorization failures are not errors here: the guard
//! maps them to redirects. These enums cover the cases that do surface:
//! provider calls that fail during an explicit user action, illegal session
//! transitions, and invalid static configuration.

use crate::role::Role;

/// Failure of a call into the external auth provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email/password pair rejected by the provider.
    #[error("invalid login credentials")]
    InvalidCredentials,
    /// Request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Provider answered with a non-success status.
    #[error("provider error {status}: {message}")]
    Provider { status: u16, message: String },
    /// Response body could not be decoded.
    #[error("unexpected provider response: {0}")]
    Decode(String),
    /// The client was built without provider configuration.
    #[error("auth provider is not configured")]
    NotConfigured,
    /// The call is only meaningful in the browser.
    #[error("not available on server")]
    Unavailable,
    /// Local input failed validation before any request was made.
    #[error("{0}")]
    Invalid(&'static str),
}

impl AuthError {
    /// Human-readable text for a transient notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Incorrect email or password.".to_owned(),
            Self::Network(_) => "Unable to reach the server. Check your connection and try again.".to_owned(),
            Self::Provider { status, .. } if *status == 429 => {
                "Too many attempts. Please wait a moment and try again.".to_owned()
            }
            Self::Provider { .. } | Self::Decode(_) => "Something went wrong. Please try again.".to_owned(),
            Self::NotConfigured | Self::Unavailable => "Sign-in is currently unavailable.".to_owned(),
            Self::Invalid(msg) => (*msg).to_owned(),
        }
    }
}

/// Rejected session state transition. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a sign-out is already in flight")]
    LogoutInFlight,
    #[error("no authenticated user to sign out")]
    NotAuthenticated,
    #[error("no sign-out is in flight")]
    NoLogoutInFlight,
    #[error("check result superseded")]
    StaleCheck,
}

/// Invalid static route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },
    #[error("route '{path}' requires roles {roles:?} but is not protected")]
    UnguardedRoles { path: String, roles: Vec<Role> },
    #[error("duplicate route pattern '{0}'")]
    Duplicate(String),
}

/// Access policy document could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to parse access policy: {0}")]
    Parse(#[from] serde_yaml::Error),
}
