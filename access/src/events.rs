//! Auth-provider event subscription.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider announces sign-in, sign-out and token changes through an
//! [`EventBus`]. Consumers hold a [`Subscription`]; dropping it removes the
//! listener, so a torn-down view never sees events meant for a live one.
//!
//! Listeners are invoked outside the registry lock, so a listener may
//! subscribe, unsubscribe or emit without deadlocking.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::identity::Identity;

/// Something the auth provider observed about the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The first session lookup settled.
    InitialSession(Option<Identity>),
    SignedIn(Identity),
    SignedOut,
    /// Tokens rotated in the background; the user is unchanged or refreshed.
    TokenRefreshed(Identity),
    /// Tokens could not be renewed; the session is gone.
    TokenExpired,
}

impl AuthEvent {
    /// Short name for log records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitialSession(_) => "initial_session",
            Self::SignedIn(_) => "signed_in",
            Self::SignedOut => "signed_out",
            Self::TokenRefreshed(_) => "token_refreshed",
            Self::TokenExpired => "token_expired",
        }
    }
}

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Cloneable handle to a shared listener registry.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Registry>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered while the returned
    /// subscription is alive.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        Subscription { registry: Arc::downgrade(&self.inner), id: Some(id) }
    }

    /// Deliver `event` to every current listener in subscription order.
    pub fn emit(&self, event: &AuthEvent) {
        let listeners: Vec<Listener> = {
            let registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        log::debug!("auth event {} -> {} listener(s)", event.name(), listeners.len());
        for listener in listeners {
            listener(event);
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listener_count()).finish()
    }
}

/// Live registration on an [`EventBus`]. Unsubscribes on drop.
#[must_use = "dropping a subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: Option<u64>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.retain(|(lid, _)| *lid != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
