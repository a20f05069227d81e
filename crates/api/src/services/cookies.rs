//! Cookie helper for admin authentication.
//!
//! Builds and reads the HttpOnly cookies used by the admin panel: the
//! signed `admin-token`, the short-lived Google OAuth handshake cookies and
//! the long-lived Google session cookie.

use axum::http::{
    header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

use crate::config::CookieConfig;

/// Name of the cookie holding the OAuth `state` value.
pub const OAUTH_STATE_COOKIE: &str = "google_oauth_state";

/// Name of the cookie holding the PKCE code verifier.
pub const OAUTH_VERIFIER_COOKIE: &str = "google_code_verifier";

/// Lifetime of the OAuth handshake cookies.
pub const OAUTH_COOKIE_MAX_AGE_SECS: i64 = 600;

/// Lifetime of a Google sign-in session.
pub const SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SameSite {
    Strict,
    Lax,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: CookieConfig,
    /// Admin token lifetime in seconds (from JWT config)
    token_expiry_secs: i64,
}

impl CookieHelper {
    pub fn new(config: CookieConfig, token_expiry_secs: i64) -> Self {
        Self {
            config,
            token_expiry_secs,
        }
    }

    /// Set-Cookie value carrying a freshly signed admin token.
    pub fn admin_token_cookie(&self, token: &str) -> String {
        self.build_cookie(
            &self.config.admin_token_name,
            token,
            self.token_expiry_secs,
            SameSite::Strict,
        )
    }

    pub fn clear_admin_token_cookie(&self) -> String {
        self.build_clear_cookie(&self.config.admin_token_name, SameSite::Strict)
    }

    /// OAuth handshake cookies use SameSite=Lax so they survive the
    /// top-level redirect back from Google.
    pub fn oauth_state_cookie(&self, state: &str) -> String {
        self.build_cookie(
            OAUTH_STATE_COOKIE,
            state,
            OAUTH_COOKIE_MAX_AGE_SECS,
            SameSite::Lax,
        )
    }

    pub fn oauth_verifier_cookie(&self, verifier: &str) -> String {
        self.build_cookie(
            OAUTH_VERIFIER_COOKIE,
            verifier,
            OAUTH_COOKIE_MAX_AGE_SECS,
            SameSite::Lax,
        )
    }

    pub fn clear_oauth_cookies(&self) -> [String; 2] {
        [
            self.build_clear_cookie(OAUTH_STATE_COOKIE, SameSite::Lax),
            self.build_clear_cookie(OAUTH_VERIFIER_COOKIE, SameSite::Lax),
        ]
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.build_cookie(
            &self.config.session_cookie_name,
            token,
            SESSION_MAX_AGE_SECS,
            SameSite::Lax,
        )
    }

    pub fn clear_session_cookie(&self) -> String {
        self.build_clear_cookie(&self.config.session_cookie_name, SameSite::Lax)
    }

    /// Extract a cookie value from request headers by name.
    pub fn extract_cookie<'a>(&self, headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|cookie_header| cookie_header.split(';'))
            .map(str::trim)
            .find_map(|cookie| {
                let (cookie_name, cookie_value) = cookie.split_once('=')?;
                (cookie_name == name && !cookie_value.is_empty()).then_some(cookie_value)
            })
    }

    /// Admin token from the cookie, falling back to an
    /// `Authorization: Bearer` header.
    pub fn extract_admin_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.extract_cookie(headers, &self.config.admin_token_name)
            .or_else(|| extract_bearer(headers))
    }

    pub fn extract_session_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.extract_cookie(headers, &self.config.session_cookie_name)
    }

    fn build_cookie(&self, name: &str, value: &str, max_age: i64, same_site: SameSite) -> String {
        let cookie = format!("{}={}; Path=/; Max-Age={}", name, value, max_age);
        self.with_attributes(cookie, same_site)
    }

    fn build_clear_cookie(&self, name: &str, same_site: SameSite) -> String {
        let cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            name
        );
        self.with_attributes(cookie, same_site)
    }

    fn with_attributes(&self, mut cookie: String, same_site: SameSite) -> String {
        cookie.push_str("; HttpOnly");
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(same_site.as_str());
        if !self.config.domain.is_empty() {
            cookie.push_str("; Domain=");
            cookie.push_str(&self.config.domain);
        }
        cookie
    }
}

/// Bearer token from the `Authorization` header, if any.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Appends Set-Cookie headers, skipping values that are not valid header text.
pub fn append_cookies<I, S>(headers: &mut HeaderMap, cookies: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for cookie in cookies {
        match HeaderValue::from_str(cookie.as_ref()) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(_) => tracing::warn!("Dropping cookie with invalid header characters"),
        }
    }
}
