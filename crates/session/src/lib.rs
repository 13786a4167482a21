//! `notapro-session` — session store and lifecycle.
//!
//! The persisted session record lives in two places: the browser cookie pair
//! and the in-process [`SessionRegistry`] mirror. This crate owns both sides
//! of that contract: hydration with the agreement invariant, login/logout
//! orchestration, and expiry on a backend 401.

pub mod manager;
pub mod registry;

pub use manager::{Hydration, SessionError, SessionManager};
pub use registry::SessionRegistry;
