//! Page-level route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are thin shells: they read auth state from context, call the
//! session actions and render static content. Which page renders for a URL,
//! and whether it may, is decided by `routes` and the guard.

pub mod account_type;
pub mod admin;
pub mod business;
pub mod courses;
pub mod dashboard;
pub mod forgot_password;
pub mod home;
pub mod instructor;
pub mod login;
pub mod messages;
pub mod not_found;
pub mod student;
