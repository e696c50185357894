//! Session controller: drives the session state machine from provider calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The top-level auth provider component owns one controller. Screens call
//! its actions (`login`, `logout`, `refresh`, `reset_password`) and never
//! touch the [`Session`] directly.
//!
//! ORDERING
//! ========
//! - The logout flag is raised synchronously, before the sign-out request
//!   is issued, so a render during the request already sees it.
//! - A second logout while one is in flight is a no-op: the flag is
//!   checked and set in one store update.
//! - Every write after an `await` goes through [`SessionStore`], which
//!   reports a store whose owner has been torn down; results arriving late
//!   are dropped.
//! - Each check carries the [`CheckId`] it was started with. A restore that
//!   settles after a newer login, or a refresh that settles after an
//!   expiry event, is dropped instead of overwriting the newer state.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::error::AuthError;
use crate::events::{AuthEvent, Subscription};
use crate::identity::Identity;
use crate::provider::{AuthProvider, Credentials, is_plausible_email};
use crate::session::{CheckId, Session};

/// Owner of the session record.
pub trait SessionStore {
    /// Read the session. `None` once the owner is gone.
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R>;

    /// Mutate the session. `None` (and no mutation) once the owner is gone.
    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R>;
}

/// Result of a logout request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Signed out; the post-logout callback ran.
    Completed,
    /// Nothing to do: a sign-out was already in flight or nobody was signed in.
    Ignored,
}

/// Folds provider results into a [`SessionStore`].
#[derive(Debug)]
pub struct SessionController<P, S> {
    provider: P,
    store: S,
}

impl<P, S> SessionController<P, S>
where
    P: AuthProvider,
    S: SessionStore,
{
    pub fn new(provider: P, store: S) -> Self {
        Self { provider, store }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the initial session restoration. Settles the session either way;
    /// a provider failure leaves the visitor anonymous.
    pub async fn restore(&self) {
        let Some(check) = self.enter_check("restore") else {
            return;
        };
        let result = self.provider.get_session().await;
        if let Err(e) = &result {
            log::warn!("session restore failed: {e}");
        }
        self.settle(check, result.map_err(|_| ()));
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; the session returns to its
    /// previous state.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let check = match self.store.write(Session::begin_check) {
            Some(Ok(check)) => check,
            Some(Err(_)) => return Err(AuthError::Invalid("A sign-out is in progress.")),
            None => return Err(AuthError::Unavailable),
        };
        match self.provider.sign_in_with_password(credentials).await {
            Ok(user) => {
                log::info!("signed in as {}", user.id);
                self.settle(check, Ok(Some(user.clone())));
                Ok(user)
            }
            Err(e) => {
                log::warn!("sign-in failed: {e}");
                self.settle(check, Err(()));
                Err(e)
            }
        }
    }

    /// Sign out. `on_complete` runs after the session is anonymous (the
    /// caller's post-logout redirect).
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; the logout flag is cleared and
    /// the session stays authenticated.
    pub async fn logout<F: FnOnce()>(&self, on_complete: F) -> Result<LogoutOutcome, AuthError> {
        match self.store.write(Session::begin_logout) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                log::debug!("logout ignored: {e}");
                return Ok(LogoutOutcome::Ignored);
            }
            None => return Ok(LogoutOutcome::Ignored),
        }

        match self.provider.sign_out().await {
            Ok(()) => {
                match self.store.write(Session::finish_logout) {
                    None => {
                        log::debug!("session owner gone before sign-out settled");
                        return Ok(LogoutOutcome::Completed);
                    }
                    // Expired mid-request; already anonymous.
                    Some(Err(e)) => log::debug!("sign-out settled late: {e}"),
                    Some(Ok(())) => log::info!("signed out"),
                }
                on_complete();
                Ok(LogoutOutcome::Completed)
            }
            Err(e) => {
                log::warn!("sign-out failed: {e}");
                let _ = self.store.write(Session::abort_logout);
                Err(e)
            }
        }
    }

    /// Explicitly re-check the session (shows loading while in flight).
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; the current user is kept.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let Some(check) = self.enter_check("refresh") else {
            return Ok(());
        };
        match self.provider.refresh_session().await {
            Ok(user) => {
                self.settle(check, Ok(user));
                Ok(())
            }
            Err(e) => {
                log::warn!("session refresh failed: {e}");
                self.settle(check, Err(()));
                Err(e)
            }
        }
    }

    /// Ask the provider to email a password reset link. The session is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] for a malformed address, otherwise the
    /// provider's error.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(AuthError::Invalid("Enter a valid email address."));
        }
        self.provider
            .reset_password_for_email(email)
            .await
            .inspect_err(|e| log::warn!("password reset request failed: {e}"))
    }

    fn enter_check(&self, reason: &str) -> Option<CheckId> {
        match self.store.write(Session::begin_check)? {
            Ok(check) => Some(check),
            Err(e) => {
                log::debug!("{reason} skipped: {e}");
                None
            }
        }
    }

    /// `Err(())` means the check failed without an answer.
    fn settle(&self, check: CheckId, result: Result<Option<Identity>, ()>) {
        let applied = self.store.write(|session| match result {
            Ok(user) => session.settle_check(check, user),
            Err(()) => session.fail_check(check),
        });
        match applied {
            Some(Ok(())) => {}
            Some(Err(e)) => log::debug!("check result dropped: {e}"),
            None => log::debug!("session owner gone before check settled"),
        }
    }
}

impl<P, S> SessionController<P, S>
where
    P: AuthProvider,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    /// Subscribe the session to provider events. Drop the subscription on
    /// teardown.
    pub fn listen(&self) -> Subscription {
        let store = self.store.clone();
        self.provider.on_auth_state_change(Box::new(move |event| apply_event(&store, event)))
    }
}

fn apply_event<S: SessionStore>(store: &S, event: &AuthEvent) {
    match store.write(|session| session.apply(event)) {
        Some(true) => log::debug!("session updated by {}", event.name()),
        Some(false) => {}
        None => log::debug!("{} ignored: session owner gone", event.name()),
    }
}
