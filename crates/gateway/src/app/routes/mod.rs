use axum::routing::{get, post};
use axum::Router;

use crate::app::services::AppState;

pub mod auth;
pub mod pages;
pub mod stats;
pub mod system;

/// Full routing tree; the guard middleware is layered on top by `build_app`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(system::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/stats", get(stats::snapshot))
        .fallback(pages::not_found)
}
