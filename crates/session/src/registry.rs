//! In-process mirror of issued session records.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use notapro_auth::{SessionToken, SessionUser};

#[derive(Debug, Clone)]
struct StoredRecord {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// Token-keyed mirror of the persisted session records.
///
/// This is the second of the two redundant stores (the cookie pair being the
/// first); hydration requires the two to agree. Expired entries are dropped
/// lazily on access.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<SessionToken, StoredRecord>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued session.
    pub fn insert(&self, token: SessionToken, user: SessionUser, expires_at: DateTime<Utc>) {
        let mut inner = self.inner.write().expect("session registry poisoned");
        inner.insert(token, StoredRecord { user, expires_at });
    }

    /// Look up the user record for a token, dropping it if expired.
    pub fn get(&self, token: &SessionToken) -> Option<SessionUser> {
        {
            let inner = self.inner.read().expect("session registry poisoned");
            match inner.get(token) {
                Some(record) if record.expires_at > Utc::now() => {
                    return Some(record.user.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry exists but is expired.
        self.remove(token);
        None
    }

    /// Drop the record for a token (logout, 401 expiry, divergence).
    pub fn remove(&self, token: &SessionToken) {
        let mut inner = self.inner.write().expect("session registry poisoned");
        inner.remove(token);
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use notapro_auth::Role;

    fn user() -> SessionUser {
        SessionUser::new("1", "a@example.com", "Ana", Role::User)
    }

    #[test]
    fn insert_then_get_returns_record() {
        let registry = SessionRegistry::new();
        let token = SessionToken::new("tok");
        registry.insert(token.clone(), user(), Utc::now() + Duration::days(2));
        assert_eq!(registry.get(&token), Some(user()));
    }

    #[test]
    fn expired_record_is_dropped_on_access() {
        let registry = SessionRegistry::new();
        let token = SessionToken::new("tok");
        registry.insert(token.clone(), user(), Utc::now() - Duration::seconds(1));
        assert_eq!(registry.get(&token), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = SessionRegistry::new();
        let token = SessionToken::new("tok");
        registry.remove(&token);
        registry.remove(&token);
        assert!(registry.is_empty());
    }
}
