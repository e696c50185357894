//! Access-control core for the Schoolier front end.
//!
//! This crate owns the rules every protected screen depends on: who the
//! current user is (`session`), which roles they hold (`role`, `policy`),
//! which URL patterns need which roles (`route`), and the single decision
//! function that turns those into loading / redirect / render (`guard`).
//!
//! It has no UI or network dependency. The `client` crate binds the
//! [`SessionStore`](controller::SessionStore) to a reactive signal and
//! implements [`AuthProvider`](provider::AuthProvider) over the Supabase REST
//! API; tests bind both to in-memory fakes.

pub mod controller;
pub mod error;
pub mod events;
pub mod guard;
pub mod identity;
pub mod location;
pub mod policy;
pub mod provider;
pub mod role;
pub mod route;
pub mod session;

pub use controller::{LogoutOutcome, SessionController, SessionStore};
pub use error::{AuthError, PolicyError, RouteError, SessionError};
pub use events::{AuthEvent, EventBus, Subscription};
pub use guard::{Decision, decide};
pub use identity::Identity;
pub use location::{DASHBOARD_PATH, LOGIN_PATH, Location, LoginQuery};
pub use policy::{AccessPolicy, BypassPredicate, RoleBypass};
pub use provider::{AuthProvider, Credentials};
pub use role::{Role, RoleSet};
pub use route::{Gate, PathPattern, RouteDefinition, RouteMatch, RouteTree};
pub use session::{CheckId, Phase, Session};
