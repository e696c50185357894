//! Browser helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each helper has a hydrate implementation backed by `web-sys`/`js-sys` and
//! an inert server implementation, so callers never branch on the feature.

pub mod clock;
pub mod storage;
