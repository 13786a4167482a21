//! Session model and the persisted-record codec.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use notapro_core::DomainError;

use crate::SessionUser;

/// Fixed lifetime of a persisted session record, in days.
///
/// Applied both to the browser cookies and to the registry mirror so the two
/// stores expire together.
pub const SESSION_TTL_DAYS: i64 = 2;

/// Expiry instant for a session persisted at `issued_at`.
pub fn session_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::days(SESSION_TTL_DAYS)
}

/// Opaque bearer token issued by the backend on login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for SessionToken {
    // Tokens are credentials; keep them out of logs.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The authenticated identity and token held for the current browser context.
///
/// Created on successful login, replaced wholesale, never mutated in place;
/// destroyed on logout or a 401 from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub token: SessionToken,
}

impl Session {
    pub fn new(user: SessionUser, token: SessionToken) -> Self {
        Self { user, token }
    }
}

/// Encode a user record for the persisted `user` cookie.
pub fn encode_user_record(user: &SessionUser) -> String {
    // SessionUser serialization is infallible (plain strings + enum).
    serde_json::to_string(user).unwrap_or_default()
}

/// Decode a persisted `user` cookie value.
///
/// Any parse failure means the record is invalid; the caller clears all
/// session state rather than surfacing an error.
pub fn decode_user_record(raw: &str) -> Result<SessionUser, DomainError> {
    serde_json::from_str(raw).map_err(|e| DomainError::invalid_record(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn record_round_trips() {
        let user = SessionUser::new("3", "c@example.com", "Carla", Role::User);
        let encoded = encode_user_record(&user);
        assert_eq!(decode_user_record(&encoded).unwrap(), user);
    }

    #[test]
    fn corrupted_record_is_invalid() {
        let err = decode_user_record("{not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecord(_)));
    }

    #[test]
    fn record_with_unknown_role_is_invalid() {
        let raw = r#"{"id":"1","email":"a@b.c","nome":"A","role":"SUPERUSER"}"#;
        assert!(decode_user_record(raw).is_err());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("top-secret");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }

    #[test]
    fn expiry_is_two_days_out() {
        let issued = Utc::now();
        assert_eq!(session_expiry(issued) - issued, Duration::days(2));
    }
}
