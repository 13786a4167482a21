//! `notapro-auth` — pure authentication domain.
//!
//! This crate is intentionally decoupled from HTTP and storage: the session
//! model, the persisted-record codec, and the route-guard decision function
//! are all deterministic and side-effect free.

pub mod guard;
pub mod role;
pub mod session;
pub mod user;

pub use guard::{CookieSnapshot, RouteDecision, evaluate};
pub use role::Role;
pub use session::{
    SESSION_TTL_DAYS, Session, SessionToken, decode_user_record, encode_user_record,
    session_expiry,
};
pub use user::SessionUser;
