//! # client
//!
//! Leptos + WASM front end for the Schoolier marketplace.
//!
//! This crate contains pages, components, application state and the
//! Supabase auth provider. Access rules (session state machine, route
//! guard, route table validation) live in the `access` crate; this crate
//! binds them to signals, the router and the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
