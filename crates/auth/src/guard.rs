//! Route guard: the pre-render navigation gate.
//!
//! A pure, synchronous decision function over `(path, cookies)`. It never
//! performs IO; the HTTP layer turns a [`RouteDecision::Redirect`] into an
//! actual redirect response.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::session::decode_user_record;

/// Cookie holding the opaque session token.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Cookie holding the JSON-encoded user record.
pub const USER_COOKIE: &str = "user";

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/signin", "/signup", "/", "/forgot-password"];

/// Prefixes the guard never evaluates (API surface, liveness, static assets).
pub const EXEMPT_PREFIXES: &[&str] = &["/auth", "/health", "/favicon.ico"];

const SIGNIN_ROUTE: &str = "/signin";
const HOME_ROUTE: &str = "/";
const ADMIN_PREFIX: &str = "/admin";

// RFC 3986 unreserved characters stay literal; everything else (including
// '/') is escaped so the callback survives as a single query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The cookies the guard decides over, as raw values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSnapshot<'a> {
    pub token: Option<&'a str>,
    pub user: Option<&'a str>,
}

impl<'a> CookieSnapshot<'a> {
    pub fn new(token: Option<&'a str>, user: Option<&'a str>) -> Self {
        Self { token, user }
    }

    fn has_token(&self) -> bool {
        self.token.is_some_and(|t| !t.is_empty())
    }
}

/// Outcome of evaluating one navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Whether `path` is reachable without authentication.
///
/// A route matches itself and everything nested under it (`/signup` covers
/// `/signup/confirm` but not `/signup-admin`).
pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|route| path == *route || path.starts_with(&format!("{route}/")))
}

/// Whether `path` requires the ADMIN role.
pub fn is_admin_scoped(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with(&format!("{ADMIN_PREFIX}/"))
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

/// Sign-in target carrying the originally requested path.
pub fn signin_redirect(path: &str) -> String {
    format!(
        "{SIGNIN_ROUTE}?callbackUrl={}",
        utf8_percent_encode(path, QUERY_VALUE)
    )
}

/// Classify one navigation request.
///
/// - Exempt or public paths are allowed unconditionally.
/// - Protected paths without a token cookie redirect to sign-in with a
///   `callbackUrl` equal to the original path.
/// - Admin-scoped paths additionally require a parsable `user` cookie with
///   the ADMIN role; otherwise the request is sent home.
pub fn evaluate(path: &str, cookies: &CookieSnapshot<'_>) -> RouteDecision {
    if is_exempt(path) || is_public(path) {
        return RouteDecision::Allow;
    }

    if !cookies.has_token() {
        return RouteDecision::Redirect(signin_redirect(path));
    }

    if is_admin_scoped(path) {
        let is_admin = cookies
            .user
            .and_then(|raw| decode_user_record(raw).ok())
            .is_some_and(|user| user.role.is_admin());
        if !is_admin {
            return RouteDecision::Redirect(HOME_ROUTE.to_string());
        }
    }

    RouteDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, SessionUser, encode_user_record};
    use proptest::prelude::*;

    fn admin_cookie() -> String {
        encode_user_record(&SessionUser::new("1", "a@example.com", "Ana", Role::Admin))
    }

    fn user_cookie() -> String {
        encode_user_record(&SessionUser::new("2", "b@example.com", "Bia", Role::User))
    }

    #[test]
    fn public_routes_allow_without_cookies() {
        for path in ["/", "/signin", "/signup", "/forgot-password", "/signin/help"] {
            assert_eq!(
                evaluate(path, &CookieSnapshot::default()),
                RouteDecision::Allow,
                "path {path}"
            );
        }
    }

    #[test]
    fn public_prefix_does_not_leak_to_siblings() {
        // "/signup-admin" shares a prefix with "/signup" but is protected.
        assert!(matches!(
            evaluate("/signup-admin", &CookieSnapshot::default()),
            RouteDecision::Redirect(_)
        ));
    }

    #[test]
    fn protected_route_without_token_redirects_with_callback() {
        let decision = evaluate("/notas-fiscais", &CookieSnapshot::default());
        assert_eq!(
            decision,
            RouteDecision::Redirect("/signin?callbackUrl=%2Fnotas-fiscais".to_string())
        );
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let cookies = CookieSnapshot::new(Some(""), None);
        assert!(matches!(
            evaluate("/empresas", &cookies),
            RouteDecision::Redirect(_)
        ));
    }

    #[test]
    fn protected_route_with_token_allows() {
        let cookies = CookieSnapshot::new(Some("tok"), None);
        assert_eq!(evaluate("/empresas", &cookies), RouteDecision::Allow);
    }

    #[test]
    fn admin_route_requires_admin_role() {
        let record = user_cookie();
        let cookies = CookieSnapshot::new(Some("tok"), Some(&record));
        assert_eq!(
            evaluate("/admin/usuarios", &cookies),
            RouteDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn admin_route_with_admin_role_allows() {
        let record = admin_cookie();
        let cookies = CookieSnapshot::new(Some("tok"), Some(&record));
        assert_eq!(evaluate("/admin/usuarios", &cookies), RouteDecision::Allow);
    }

    #[test]
    fn admin_route_with_corrupt_user_cookie_goes_home() {
        let cookies = CookieSnapshot::new(Some("tok"), Some("{not json"));
        assert_eq!(
            evaluate("/admin", &cookies),
            RouteDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn admin_route_without_user_cookie_goes_home() {
        let cookies = CookieSnapshot::new(Some("tok"), None);
        assert_eq!(
            evaluate("/admin", &cookies),
            RouteDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn exempt_prefixes_bypass_the_guard() {
        for path in ["/auth/login", "/auth/session", "/health", "/favicon.ico"] {
            assert_eq!(
                evaluate(path, &CookieSnapshot::default()),
                RouteDecision::Allow,
                "path {path}"
            );
        }
    }

    proptest! {
        // Any protected path without a token cookie redirects to sign-in,
        // and the callback decodes back to the original path.
        #[test]
        fn unauthenticated_protected_paths_always_redirect(
            segment in "[a-z0-9-]{1,16}",
            nested in "[a-z0-9-]{0,16}",
        ) {
            let path = if nested.is_empty() {
                format!("/{segment}")
            } else {
                format!("/{segment}/{nested}")
            };
            prop_assume!(!is_public(&path) && !super::is_exempt(&path));

            let decision = evaluate(&path, &CookieSnapshot::default());
            let RouteDecision::Redirect(target) = decision else {
                return Err(TestCaseError::fail(format!("{path} was allowed")));
            };
            prop_assert!(target.starts_with("/signin?callbackUrl="));

            let encoded = target.trim_start_matches("/signin?callbackUrl=");
            let decoded = percent_encoding::percent_decode_str(encoded)
                .decode_utf8()
                .unwrap();
            prop_assert_eq!(decoded.as_ref(), path.as_str());
        }

        // A non-admin record never reaches an admin-scoped path.
        #[test]
        fn admin_paths_reject_non_admin_records(tail in "[a-z0-9/-]{0,24}") {
            let path = format!("/admin/{tail}");
            let record = user_cookie();
            let cookies = CookieSnapshot::new(Some("tok"), Some(&record));
            prop_assert_eq!(
                evaluate(&path, &cookies),
                RouteDecision::Redirect("/".to_string())
            );
        }
    }
}
