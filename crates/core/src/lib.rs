//! `notapro-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP or storage concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
