//! Session lifecycle routes.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use notapro_auth::SessionToken;
use notapro_session::{Hydration, SessionError};

use crate::app::errors;
use crate::app::services::AppState;
use crate::cookies;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

/// `POST /auth/login` — authenticate against the backend, persist the
/// session to both stores, then answer with a full navigation to the home
/// route so all dependent state reinitializes.
///
/// Any existing persisted record is cleared by the attempt: a failed login
/// answers with removal cookies so the previous session cannot survive it.
/// The one exception is a duplicate in-flight submit, which must not clobber
/// the cookies the winning attempt is about to set.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> Response {
    let previous = cookies::read(&jar).token().map(SessionToken::new);

    match state
        .sessions
        .login(&form.email, &form.senha, previous.as_ref())
        .await
    {
        Ok(session) => {
            let jar = cookies::persist_session(jar, &session, state.cookie_secure);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e @ SessionError::InFlight) => errors::session_error_to_response(e),
        Err(e) => {
            let jar = cookies::clear_session(jar);
            (jar, errors::session_error_to_response(e)).into_response()
        }
    }
}

/// `POST /auth/logout` — clear both stores and navigate to sign-in,
/// regardless of the remote outcome.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = cookies::read(&jar).token().map(SessionToken::new);
    state.sessions.logout(token.as_ref()).await;

    let jar = cookies::clear_session(jar);
    (jar, Redirect::to("/signin")).into_response()
}

/// `GET /auth/session` — hydrate the session from the persisted stores.
///
/// An invalid record (missing/corrupt user data with a token present, or
/// divergent stores) is cleared fail-safe and answered with a redirect to
/// sign-in, never an error.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let stored = cookies::read(&jar);

    match state.sessions.hydrate(&stored.snapshot()) {
        Hydration::Active {
            session,
            refresh_user_cookie,
        } => {
            let out = CookieJar::new();
            let out = if refresh_user_cookie {
                cookies::refresh_user(out, &session.user, state.cookie_secure)
            } else {
                out
            };
            (out, Json(session.user)).into_response()
        }
        Hydration::Cleared => {
            // Only emit removal cookies when there is stale state to clear.
            let out = if stored.is_empty() {
                CookieJar::new()
            } else {
                cookies::clear_session(CookieJar::new())
            };
            (out, Redirect::temporary("/signin")).into_response()
        }
    }
}
