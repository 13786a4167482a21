//! Route-guard middleware: one guard decision per routed request.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use notapro_auth::{RouteDecision, evaluate};

use crate::cookies;

/// Evaluate the pure guard over `(path, cookies)` before rendering anything.
///
/// Allowed requests pass through untouched; everything else becomes a
/// temporary redirect to the guard's target.
pub async fn route_guard(req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let decision = evaluate(req.uri().path(), &cookies::read(&jar).snapshot());

    match decision {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(path = %req.uri().path(), %target, "navigation redirected");
            Redirect::temporary(&target).into_response()
        }
    }
}
