//! Boundary to the external authentication provider.
//!
//! The provider owns tokens and persistence; the access layer only sees
//! resolved [`Identity`] values and [`AuthError`]s. Futures are not `Send`:
//! implementations run on the browser's single-threaded event loop.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::events::{AuthEvent, Subscription};
use crate::identity::Identity;

/// Email + password pair submitted by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).field("password", &"***").finish()
    }
}

impl Credentials {
    /// Trim and check the form input before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] with a user-facing message when a
    /// field is missing or the email is malformed.
    pub fn validate(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Invalid("Enter both your email and password."));
        }
        if !is_plausible_email(email) {
            return Err(AuthError::Invalid("Enter a valid email address."));
        }
        Ok(Self { email: email.to_owned(), password: password.to_owned() })
    }
}

/// Cheap shape check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Operations the access layer needs from the auth backend.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Restore the persisted session, if any.
    async fn get_session(&self) -> Result<Option<Identity>, AuthError>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn reset_password_for_email(&self, email: &str) -> Result<(), AuthError>;

    /// Rotate tokens. `Ok(None)` means the session can no longer be renewed.
    async fn refresh_session(&self) -> Result<Option<Identity>, AuthError>;

    /// Register for provider events. The listener stays registered while
    /// the returned subscription is alive.
    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> Subscription;
}
