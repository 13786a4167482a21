//! Session lifecycle: hydration, login, logout, 401 expiry.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use notapro_auth::{CookieSnapshot, Session, SessionToken, decode_user_record, session_expiry};
use notapro_client::{ApiError, AuthBackend};

use crate::registry::SessionRegistry;

/// Failure of a session mutation, shaped for direct display.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A sign-in is already in flight; duplicate submits are rejected, not
    /// queued.
    #[error("another sign-in is already in flight")]
    InFlight,

    /// The backend refused the credentials; `message` comes from its error
    /// payload or a generic fallback.
    #[error("{message}")]
    Credentials { message: String },

    /// The backend could not be reached or answered malformed data.
    #[error("backend unavailable: {0}")]
    Backend(ApiError),
}

/// Outcome of initializing session state from the persisted stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Hydration {
    /// A valid session. `refresh_user_cookie` is set when the user record was
    /// restored from the registry and must be mirrored back into the cookie.
    Active {
        session: Session,
        refresh_user_cookie: bool,
    },
    /// No session, or an invalid persisted record; every store holding a
    /// piece of it has been (or must be) cleared.
    Cleared,
}

/// The single process-wide session store.
///
/// Holds the registry mirror and drives the auth backend. All mutation goes
/// through here; the HTTP layer only translates outcomes into cookies and
/// redirects.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    registry: SessionRegistry,
    login_gate: Mutex<()>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            registry: SessionRegistry::new(),
            login_gate: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Initialize session state from the persisted cookie pair.
    ///
    /// Fail-safe by construction: a token with a missing or unparsable user
    /// record, or a record that disagrees with the registry mirror, yields
    /// [`Hydration::Cleared`] rather than an error. Running this twice over
    /// the same cleared state yields the same result.
    pub fn hydrate(&self, cookies: &CookieSnapshot<'_>) -> Hydration {
        let token = match cookies.token {
            Some(raw) if !raw.is_empty() => SessionToken::new(raw),
            _ => return Hydration::Cleared,
        };

        match cookies.user {
            Some(raw) => match decode_user_record(raw) {
                Ok(cookie_user) => match self.registry.get(&token) {
                    Some(mirrored) if mirrored != cookie_user => {
                        // The two stores disagree: the record is invalid.
                        tracing::warn!("session record diverged between stores; clearing");
                        self.registry.remove(&token);
                        Hydration::Cleared
                    }
                    Some(_) => Hydration::Active {
                        session: Session::new(cookie_user, token),
                        refresh_user_cookie: false,
                    },
                    None => {
                        // Cookie survived a process restart; re-mirror it.
                        self.registry.insert(
                            token.clone(),
                            cookie_user.clone(),
                            session_expiry(Utc::now()),
                        );
                        Hydration::Active {
                            session: Session::new(cookie_user, token),
                            refresh_user_cookie: false,
                        }
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "unparsable user record with token present; clearing");
                    self.registry.remove(&token);
                    Hydration::Cleared
                }
            },
            None => match self.registry.get(&token) {
                Some(mirrored) => Hydration::Active {
                    session: Session::new(mirrored, token),
                    refresh_user_cookie: true,
                },
                None => Hydration::Cleared,
            },
        }
    }

    /// Read-only view of [`Self::hydrate`].
    pub fn current_session(&self, cookies: &CookieSnapshot<'_>) -> Option<Session> {
        match self.hydrate(cookies) {
            Hydration::Active { session, .. } => Some(session),
            Hydration::Cleared => None,
        }
    }

    /// Sign in, replacing any previously persisted record.
    ///
    /// The returned session has already been mirrored into the registry with
    /// the fixed 2-day expiry; the caller persists the cookie pair and
    /// performs a full navigation to the home route.
    pub async fn login(
        &self,
        email: &str,
        senha: &str,
        previous: Option<&SessionToken>,
    ) -> Result<Session, SessionError> {
        let Ok(_guard) = self.login_gate.try_lock() else {
            return Err(SessionError::InFlight);
        };

        // Clear any existing persisted record before attempting a new login.
        if let Some(previous) = previous {
            self.registry.remove(previous);
        }

        let response = self
            .backend
            .login(email, senha)
            .await
            .map_err(login_error)?;

        let token = SessionToken::new(response.token);
        self.registry.insert(
            token.clone(),
            response.user.clone(),
            session_expiry(Utc::now()),
        );

        tracing::info!(user = %response.user.id, "signed in");
        Ok(Session::new(response.user, token))
    }

    /// Sign out: remote logout, then drop the local record.
    ///
    /// Never fails; the caller clears the cookie pair and navigates to the
    /// sign-in route regardless of the remote outcome. A 401 from the
    /// backend means the token is already dead remotely and goes through
    /// the global expiry path instead of a plain removal.
    pub async fn logout(&self, token: Option<&SessionToken>) {
        let Some(token) = token else { return };

        match self.backend.logout(token).await {
            Ok(()) => self.registry.remove(token),
            Err(ApiError::Unauthorized) => self.expire(token),
            Err(e) => {
                self.registry.remove(token);
                tracing::warn!(error = %e, "remote logout failed; clearing local session anyway");
            }
        }
    }

    /// Global 401 handling: the backend rejected the token on an
    /// authenticated call, so the mirrored record is dropped. The caller
    /// clears the cookie pair alongside.
    pub fn expire(&self, token: &SessionToken) {
        tracing::debug!("expiring session after backend 401");
        self.registry.remove(token);
    }
}

/// Map a login failure into something the sign-in form can display.
fn login_error(err: ApiError) -> SessionError {
    match err {
        ApiError::Unauthorized => SessionError::Credentials {
            message: "e-mail ou senha inválidos".to_string(),
        },
        ApiError::Rejected { status, message } if (400..500).contains(&status) => {
            SessionError::Credentials { message }
        }
        other => SessionError::Backend(other),
    }
}
