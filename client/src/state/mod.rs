//! Shared client-side state.
//!
//! DESIGN
//! ======
//! `auth` binds the access-layer session to a signal and owns the session
//! controller; `toast` holds transient notifications. Both are provided as
//! context by the root component.

pub mod auth;
pub mod toast;
