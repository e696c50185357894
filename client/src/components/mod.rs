//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `route_outlet` and `private_route` connect the router to the access
//! layer; the rest is shared chrome read from context providers.

pub mod nav_bar;
pub mod private_route;
pub mod route_outlet;
pub mod spinner;
pub mod toast_host;
pub mod under_development;
