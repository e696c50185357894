//! Route guard decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route render asks [`decide`] what to show. The answer is
//! one of four outcomes and the function is total: it never panics and
//! never returns an error.
//!
//! ORDER
//! =====
//! The checks run in a fixed order and the first one that applies wins:
//!
//! 1. not ready or loading -> `Loading` (a reload must not flash a login
//!    redirect before session restoration settles)
//! 2. sign-out in flight -> `RedirectLogin { logout: true }`
//! 3. nobody signed in -> `RedirectLogin` carrying the current location
//! 4. roles required and none held -> `RedirectDashboard`
//! 5. otherwise -> `Render`

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::location::{DASHBOARD_PATH, Location, LoginQuery};
use crate::policy::AccessPolicy;
use crate::role::Role;
use crate::session::Session;

/// What a guarded route should do for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Show a loading indicator; decide again when the session settles.
    Loading,
    /// Authentication failure or sign-out: go to the login screen.
    RedirectLogin {
        /// Arrived because of a sign-out.
        logout: bool,
        /// Where login should send the user afterwards.
        return_to: Option<Location>,
    },
    /// Authorization failure: go to the default landing page.
    RedirectDashboard,
    /// Show the route's content.
    Render,
}

impl Decision {
    /// Navigation target for redirect outcomes.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::Loading | Self::Render => None,
            Self::RedirectDashboard => Some(DASHBOARD_PATH.to_owned()),
            Self::RedirectLogin { logout: true, .. } => Some(LoginQuery::forced_logout().to_href()),
            Self::RedirectLogin { logout: false, return_to } => Some(
                return_to
                    .as_ref()
                    .map_or_else(LoginQuery::default, LoginQuery::returning_to)
                    .to_href(),
            ),
        }
    }

    /// Short name for log records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::RedirectLogin { logout: true, .. } => "redirect_login_logout",
            Self::RedirectLogin { .. } => "redirect_login",
            Self::RedirectDashboard => "redirect_dashboard",
            Self::Render => "render",
        }
    }
}

/// Decide whether a route requiring `required_roles` (empty = any signed-in
/// user) renders for `session` at `location`.
#[must_use]
pub fn decide(session: &Session, required_roles: &[Role], location: &Location, policy: &AccessPolicy) -> Decision {
    let decision = evaluate(session, required_roles, location, policy);
    match &decision {
        Decision::RedirectDashboard => {
            log::info!(
                "access denied to {}: requires any of {:?}, user holds {:?}",
                location.path,
                required_roles,
                session.roles()
            );
        }
        other => log::debug!("guard {} -> {}", location.path, other.name()),
    }
    decision
}

fn evaluate(session: &Session, required_roles: &[Role], location: &Location, policy: &AccessPolicy) -> Decision {
    if session.is_loading() || !session.auth_state_ready() {
        return Decision::Loading;
    }
    if session.is_logging_out() {
        return Decision::RedirectLogin { logout: true, return_to: None };
    }
    let Some(user) = session.current_user() else {
        return Decision::RedirectLogin { logout: false, return_to: Some(location.clone()) };
    };
    if !policy.permits(user, required_roles) {
        return Decision::RedirectDashboard;
    }
    Decision::Render
}
