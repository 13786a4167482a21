//! Cookie-side persistence of the session record.
//!
//! Both cookies share the fixed 2-day lifetime, `Path=/` and
//! `SameSite=Strict`. The token cookie is `HttpOnly`; the user record cookie
//! stays script-readable so pages can gate UI by role. Values are
//! percent-encoded on write (the user record is JSON, which is not valid as
//! raw cookie octets) and decoded on read.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use time::Duration;

use notapro_auth::guard::{AUTH_TOKEN_COOKIE, USER_COOKIE};
use notapro_auth::{CookieSnapshot, SESSION_TTL_DAYS, Session, SessionUser, encode_user_record};

// The characters RFC 6265 forbids in a cookie-octet, plus '%' so decoding
// round-trips.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// Decoded cookie values, owned so the guard can borrow them.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    token: Option<String>,
    user: Option<String>,
}

impl SessionCookies {
    pub fn snapshot(&self) -> CookieSnapshot<'_> {
        CookieSnapshot::new(self.token.as_deref(), self.user.as_deref())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Read and decode both session cookies.
pub fn read(jar: &CookieJar) -> SessionCookies {
    SessionCookies {
        token: jar.get(AUTH_TOKEN_COOKIE).map(|c| decode_value(c.value())),
        user: jar.get(USER_COOKIE).map(|c| decode_value(c.value())),
    }
}

/// Persist a freshly issued session into both cookies.
pub fn persist_session(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    let mut token = session_cookie(AUTH_TOKEN_COOKIE, session.token.as_str(), secure);
    token.set_http_only(true);

    jar.add(token).add(session_cookie(
        USER_COOKIE,
        &encode_user_record(&session.user),
        secure,
    ))
}

/// Re-mirror the user record into its cookie after it was restored from the
/// registry.
pub fn refresh_user(jar: CookieJar, user: &SessionUser, secure: bool) -> CookieJar {
    jar.add(session_cookie(USER_COOKIE, &encode_user_record(user), secure))
}

/// Expire both cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(AUTH_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(USER_COOKIE).path("/"))
}

/// Encoded wire value of the user record cookie (exposed for tests).
pub fn user_cookie_value(user: &SessionUser) -> String {
    encode_value(&encode_user_record(user))
}

fn encode_value(raw: &str) -> String {
    utf8_percent_encode(raw, COOKIE_VALUE).to_string()
}

fn decode_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn session_cookie(name: &'static str, value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, encode_value(value)))
        .path("/")
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notapro_auth::{Role, SessionToken, decode_user_record};

    fn session() -> Session {
        Session::new(
            SessionUser::new("7", "ana@example.com", "Ana Souza", Role::Admin),
            SessionToken::new("tok-1"),
        )
    }

    #[test]
    fn persisted_cookies_agree_with_the_session() {
        let jar = persist_session(CookieJar::new(), &session(), true);

        let token = jar.get(AUTH_TOKEN_COOKIE).unwrap();
        assert_eq!(token.value(), "tok-1");
        assert_eq!(token.http_only(), Some(true));
        assert_eq!(token.max_age(), Some(Duration::days(2)));

        let raw = jar.get(USER_COOKIE).unwrap().value().to_string();
        let decoded = decode_user_record(&decode_value(&raw)).unwrap();
        assert_eq!(decoded, session().user);
    }

    #[test]
    fn user_record_value_is_cookie_safe() {
        let value = user_cookie_value(&session().user);
        assert!(!value.contains('"') && !value.contains(',') && !value.contains(';'));
    }

    #[test]
    fn read_decodes_both_cookies() {
        let jar = persist_session(CookieJar::new(), &session(), false);
        let cookies = read(&jar);
        assert_eq!(cookies.token(), Some("tok-1"));

        let snap = cookies.snapshot();
        let user = decode_user_record(snap.user.unwrap()).unwrap();
        assert_eq!(user, session().user);
    }

    #[test]
    fn clear_removes_both_cookies() {
        let jar = persist_session(CookieJar::new(), &session(), false);
        let jar = clear_session(jar);
        assert!(jar.get(AUTH_TOKEN_COOKIE).is_none());
        assert!(jar.get(USER_COOKIE).is_none());
    }
}
