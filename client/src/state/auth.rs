//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root component creates one [`AuthContext`] and provides it as
//! context. Route guards read the session signal; screens call the async
//! actions and never mutate the session directly.
//!
//! LIFECYCLE
//! =========
//! [`AuthContext::install`] subscribes the session to provider events,
//! restores the persisted session and starts the background token refresh.
//! All three stop when the owning reactive scope is cleaned up: the
//! subscription is dropped and the refresh loop sees its liveness flag
//! cleared. Results arriving after teardown hit a disposed signal and are
//! discarded by [`SignalStore`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;

use access::{
    AccessPolicy, AuthError, Credentials, Decision, Identity, Location, LogoutOutcome, RouteMatch, Session,
    SessionController, SessionStore,
};

use crate::net::supabase::SupabaseAuth;

/// [`SessionStore`] over a reactive signal. Reports the owner gone once the
/// signal is disposed.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore(pub RwSignal<Session>);

impl SessionStore for SignalStore {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

type Controller = SessionController<SupabaseAuth, SignalStore>;

/// Session signal plus the controller driving it.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    controller: Arc<Controller>,
    policy: Arc<AccessPolicy>,
}

impl AuthContext {
    pub fn new(provider: SupabaseAuth, policy: AccessPolicy) -> Self {
        let session = RwSignal::new(Session::default());
        Self {
            session,
            controller: Arc::new(SessionController::new(provider, SignalStore(session))),
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Current user, tracked.
    pub fn user(&self) -> Option<Identity> {
        self.session.with(|s| s.current_user().cloned())
    }

    /// Guard decision for `matched` at `location`, tracked.
    pub fn decide<E>(&self, matched: &RouteMatch<E>, location: &Location) -> Decision {
        self.session.with(|s| matched.decide(s, location, &self.policy))
    }

    /// Wire the session to the provider for the lifetime of the current
    /// reactive owner.
    pub fn install(&self) {
        let subscription = self.controller.listen();
        on_cleanup(move || drop(subscription));

        #[cfg(feature = "hydrate")]
        {
            use std::sync::atomic::{AtomicBool, Ordering};
            use std::time::Duration;

            use crate::config::REFRESH_INTERVAL_SECS;

            let alive = Arc::new(AtomicBool::new(true));
            let alive_task = Arc::clone(&alive);
            let controller = Arc::clone(&self.controller);
            leptos::task::spawn_local(async move {
                controller.restore().await;
                loop {
                    gloo_timers::future::sleep(Duration::from_secs(u64::from(REFRESH_INTERVAL_SECS))).await;
                    if !alive_task.load(Ordering::Relaxed) {
                        break;
                    }
                    let signed_in = controller
                        .store()
                        .read(|s| s.is_authenticated() && !s.is_logging_out())
                        .unwrap_or(false);
                    if !signed_in {
                        continue;
                    }
                    // Applied through provider events; no loading state.
                    if let Err(e) = controller.provider().refresh_session().await {
                        log::warn!("background token refresh failed: {e}");
                    }
                }
            });
            on_cleanup(move || alive.store(false, Ordering::Relaxed));
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`].
    pub async fn login(&self, credentials: Credentials) -> Result<Identity, AuthError> {
        self.controller.login(&credentials).await
    }

    /// Sign out; `on_complete` runs once the session is anonymous.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; the user stays signed in.
    pub async fn logout<F: FnOnce()>(&self, on_complete: F) -> Result<LogoutOutcome, AuthError> {
        self.controller.logout(on_complete).await
    }

    /// Re-check the session with a loading state.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`]; the current user is kept.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        self.controller.refresh().await
    }

    /// Request a password reset email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] for a malformed address, otherwise the
    /// provider's error.
    pub async fn reset_password(&self, email: String) -> Result<(), AuthError> {
        self.controller.reset_password(&email).await
    }
}

/// The [`AuthContext`] provided by the root component.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
