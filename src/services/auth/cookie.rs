//! Cookie transport for the session token.
//!
//! One well-known cookie carries the signed token. Attributes are fixed here
//! (path `/`, HttpOnly, SameSite=Lax, Max-Age matching the token lifetime);
//! only the `Domain` and `Secure` attributes vary by deployment.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::services::auth::token::SESSION_TTL_SECS;

/// Canonical session cookie name.
pub const SESSION_COOKIE: &str = "session-token";

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Deployment-dependent cookie attributes, derived from config once at
/// startup and shared read-only.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// `Domain` attribute; `None` leaves the cookie host-scoped.
    pub domain: Option<String>,
    /// Baseline `Secure` flag (true for production/TLS deployments).
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(domain: Option<String>, secure: bool) -> Self {
        Self { domain, secure }
    }

    /// `Secure` for a concrete request: the configured baseline, or on
    /// regardless when an upstream proxy reports TLS termination.
    pub fn secure_for_request(&self, headers: &HeaderMap) -> bool {
        self.secure
            || headers
                .get(X_FORWARDED_PROTO)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.eq_ignore_ascii_case("https"))
    }
}

fn base_cookie(value: String, domain: Option<&str>, secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if let Some(domain) = domain {
        builder = builder.domain(domain.to_owned());
    }
    builder.build()
}

/// Build the session cookie carrying `token`. Max-Age matches the token
/// lifetime so the browser drops the cookie when the token would expire
/// anyway.
pub fn session_cookie(token: String, domain: Option<&str>, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(token, domain, secure);
    cookie.set_max_age(Duration::seconds(SESSION_TTL_SECS));
    cookie
}

/// Build a removal cookie: same name/path/domain, empty value, expiry in
/// the past. Sending it forces client-side deletion.
pub fn removal_cookie(domain: Option<&str>, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), domain, secure);
    cookie.make_removal();
    cookie
}

/// Extract the raw session token from the inbound request headers.
///
/// Returns `None` for an absent cookie and for a value that is empty after
/// trimming surrounding whitespace; both count as "no credential presented".
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let raw = jar.get(SESSION_COOKIE)?.value().trim().to_owned();
    if raw.is_empty() { None } else { Some(raw) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".into(), Some("example.com"), true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(SESSION_TTL_SECS)));
    }

    #[test]
    fn removal_cookie_forces_deletion() {
        let cookie = removal_cookie(None, false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn read_returns_token_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session-token=abc123; other=x".parse().unwrap());
        assert_eq!(read_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn read_missing_cookie_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(read_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "other=x".parse().unwrap());
        assert_eq!(read_session_token(&headers), None);
    }

    #[test]
    fn read_whitespace_value_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session-token=   ".parse().unwrap());
        assert_eq!(read_session_token(&headers), None);
    }

    #[test]
    fn forwarded_proto_upgrades_secure() {
        let settings = CookieSettings::new(None, false);

        let headers = HeaderMap::new();
        assert!(!settings.secure_for_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_PROTO, "https".parse().unwrap());
        assert!(settings.secure_for_request(&headers));
    }
}
