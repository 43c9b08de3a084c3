//! Session cookies.
//!
//! The backend session travels as three HttpOnly cookies. Controllers report
//! what happened to the session as a `SessionChange`; this module is the only
//! place that turns that into `Set-Cookie` headers.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::backend::Session;
use crate::context::SessionChange;

pub const ACCESS_COOKIE: &str = "sb-access-token";
pub const REFRESH_COOKIE: &str = "sb-refresh-token";
pub const EXPIRES_COOKIE: &str = "sb-expires-at";

/// Cookies outlive the access token so an expired one can still be refreshed.
const COOKIE_MAX_AGE_DAYS: i64 = 30;

/// Read the session carried by the request, if complete.
///
/// An unreadable expiry is treated as already expired, which forces a refresh.
#[must_use]
pub fn session_from_jar(jar: &CookieJar) -> Option<Session> {
    let access_token = jar.get(ACCESS_COOKIE).map(Cookie::value).unwrap_or_default();
    let refresh_token = jar.get(REFRESH_COOKIE).map(Cookie::value).unwrap_or_default();
    if access_token.is_empty() || refresh_token.is_empty() {
        return None;
    }
    let expires_at = jar
        .get(EXPIRES_COOKIE)
        .and_then(|c| c.value().parse::<i64>().ok())
        .unwrap_or(0);
    Some(Session { access_token: access_token.to_owned(), refresh_token: refresh_token.to_owned(), expires_at })
}

fn build_cookie(name: &'static str, value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

/// Add the `Set-Cookie` headers for a session change.
#[must_use]
pub fn apply_session_change(jar: CookieJar, change: &SessionChange, secure: bool) -> CookieJar {
    match change {
        SessionChange::Unchanged => jar,
        SessionChange::Stored(session) => {
            let max_age = Duration::days(COOKIE_MAX_AGE_DAYS);
            jar.add(build_cookie(ACCESS_COOKIE, session.access_token.clone(), secure, max_age))
                .add(build_cookie(REFRESH_COOKIE, session.refresh_token.clone(), secure, max_age))
                .add(build_cookie(EXPIRES_COOKIE, session.expires_at.to_string(), secure, max_age))
        }
        SessionChange::Cleared => [ACCESS_COOKIE, REFRESH_COOKIE, EXPIRES_COOKIE]
            .into_iter()
            .fold(jar, |jar, name| jar.add(build_cookie(name, String::new(), secure, Duration::ZERO))),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
