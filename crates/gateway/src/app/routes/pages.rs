//! Page placeholders.
//!
//! The CRUD pages themselves (companies, fiscal notes, users) are rendered
//! elsewhere; the gateway only guards navigation to them. The fallback keeps
//! guard semantics observable for any path.

use axum::http::StatusCode;
use axum::response::Html;

/// `GET /` — public landing page.
pub async fn home() -> Html<&'static str> {
    Html("<!doctype html><title>NotaPro</title><h1>NotaPro</h1>")
}

/// Fallback for paths the gateway does not render itself.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "page not found")
}
