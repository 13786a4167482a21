//! `notapro-client` — thin HTTP client for the NotaPro REST backend.
//!
//! Everything here is transport glue: typed request/response DTOs, bearer
//! injection, and mapping of backend failures into [`ApiError`]. Business
//! decisions (what to do on a 401, when to clear session state) belong to
//! the callers.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, AuthBackend};
pub use dto::{LoginRequest, LoginResponse, NoteStats};
pub use error::ApiError;
