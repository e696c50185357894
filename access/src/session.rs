//! Session record and its lifecycle state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `Session` exists per page load. It is owned by the top-level auth
//! provider and read by every route guard.
//!
//! ```text
//! uninitialized -> checking -> { authenticated, anonymous } -> logging_out -> anonymous
//! ```
//!
//! INVARIANTS
//! ==========
//! - `is_authenticated()` is derived from `current_user`, so the two cannot
//!   disagree.
//! - `auth_state_ready` flips to true on the first settled check and is
//!   never cleared. Logging out lands in `Anonymous`, not `Uninitialized`.
//! - A rejected transition returns [`SessionError`] and leaves the record
//!   unchanged.
//! - Only the newest check may settle the session, and only while it is
//!   still `Checking`. An older result, or one arriving after an event
//!   already settled the session, is rejected as stale.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::error::SessionError;
use crate::events::AuthEvent;
use crate::identity::Identity;
use crate::role::RoleSet;

/// Lifecycle phase of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No check has run yet.
    #[default]
    Uninitialized,
    /// Restoration, refresh or login request in flight.
    Checking,
    Authenticated,
    Anonymous,
    /// Sign-out request in flight; the user is still attached.
    LoggingOut,
}

/// Ticket for one in-flight check, issued by [`Session::begin_check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckId(u64);

/// Reactive record of the current user's authentication status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    current_user: Option<Identity>,
    auth_state_ready: bool,
    checks: u64,
}

static NO_ROLES: RoleSet = RoleSet::new();

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&Identity> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Checking
    }

    #[must_use]
    pub fn auth_state_ready(&self) -> bool {
        self.auth_state_ready
    }

    #[must_use]
    pub fn is_logging_out(&self) -> bool {
        self.phase == Phase::LoggingOut
    }

    /// Roles of the current user; empty when anonymous.
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        self.current_user.as_ref().map_or(&NO_ROLES, |user| &user.roles)
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Enter `Checking` for a restoration, refresh or login request.
    /// The current user, if any, stays attached until the check settles.
    /// Any check already in flight is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LogoutInFlight`] while a sign-out is pending.
    pub fn begin_check(&mut self) -> Result<CheckId, SessionError> {
        if self.phase == Phase::LoggingOut {
            return Err(SessionError::LogoutInFlight);
        }
        self.phase = Phase::Checking;
        self.checks += 1;
        Ok(CheckId(self.checks))
    }

    /// Settle check `id` with the provider's answer.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LogoutInFlight`] while a sign-out is pending.
    /// - [`SessionError::StaleCheck`] if `id` was superseded or the session
    ///   already left `Checking`.
    pub fn settle_check(&mut self, id: CheckId, user: Option<Identity>) -> Result<(), SessionError> {
        self.ensure_current(id)?;
        self.resolve(user)
    }

    /// Settle with the provider's answer: a user or nobody.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LogoutInFlight`] while a sign-out is pending;
    /// the sign-out owns the next transition.
    pub fn resolve(&mut self, user: Option<Identity>) -> Result<(), SessionError> {
        if self.phase == Phase::LoggingOut {
            return Err(SessionError::LogoutInFlight);
        }
        self.phase = if user.is_some() { Phase::Authenticated } else { Phase::Anonymous };
        self.current_user = user;
        self.auth_state_ready = true;
        Ok(())
    }

    /// Settle check `id` as failed without an answer (network error). The
    /// previously attached user, if any, is kept.
    ///
    /// # Errors
    ///
    /// Same as [`Session::settle_check`].
    pub fn fail_check(&mut self, id: CheckId) -> Result<(), SessionError> {
        self.ensure_current(id)?;
        self.phase = if self.current_user.is_some() { Phase::Authenticated } else { Phase::Anonymous };
        self.auth_state_ready = true;
        Ok(())
    }

    fn ensure_current(&self, id: CheckId) -> Result<(), SessionError> {
        if self.phase == Phase::LoggingOut {
            return Err(SessionError::LogoutInFlight);
        }
        if self.phase != Phase::Checking || id.0 != self.checks {
            return Err(SessionError::StaleCheck);
        }
        Ok(())
    }

    /// Raise the logout-in-progress flag. Must happen before the sign-out
    /// request is issued.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LogoutInFlight`] if a sign-out is already pending.
    /// - [`SessionError::NotAuthenticated`] if nobody is signed in.
    pub fn begin_logout(&mut self) -> Result<(), SessionError> {
        if self.phase == Phase::LoggingOut {
            return Err(SessionError::LogoutInFlight);
        }
        if self.current_user.is_none() {
            return Err(SessionError::NotAuthenticated);
        }
        self.phase = Phase::LoggingOut;
        Ok(())
    }

    /// Sign-out succeeded: drop the user, land in `Anonymous`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLogoutInFlight`] outside `LoggingOut`.
    pub fn finish_logout(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::LoggingOut {
            return Err(SessionError::NoLogoutInFlight);
        }
        self.phase = Phase::Anonymous;
        self.current_user = None;
        Ok(())
    }

    /// Sign-out failed: clear the flag and return to `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLogoutInFlight`] outside `LoggingOut`.
    pub fn abort_logout(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::LoggingOut {
            return Err(SessionError::NoLogoutInFlight);
        }
        self.phase = Phase::Authenticated;
        Ok(())
    }

    /// Fold a provider event into the record. Returns whether anything
    /// changed.
    ///
    /// While a sign-out is pending only a forced expiry is applied; the
    /// sign-out call settles the rest.
    pub fn apply(&mut self, event: &AuthEvent) -> bool {
        let before = self.clone();
        match event {
            AuthEvent::InitialSession(user) => {
                // Only the first check is the restore this event reports on.
                if !self.auth_state_ready && self.checks <= 1 {
                    let _ = self.resolve(user.clone());
                }
            }
            AuthEvent::SignedIn(user) => {
                let _ = self.resolve(Some(user.clone()));
            }
            AuthEvent::TokenRefreshed(user) => {
                if self.current_user.is_some() && self.phase != Phase::LoggingOut {
                    self.current_user = Some(user.clone());
                }
            }
            AuthEvent::SignedOut => {
                if self.phase != Phase::LoggingOut {
                    let _ = self.resolve(None);
                }
            }
            AuthEvent::TokenExpired => {
                self.phase = Phase::Anonymous;
                self.current_user = None;
                self.auth_state_ready = true;
            }
        }
        *self != before
    }
}
