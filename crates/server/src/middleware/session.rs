//! Session cookie construction.
//!
//! The session is carried in a single named cookie whose value is the opaque
//! token stored on the user record. The cookie is HTTP-only so scripts never
//! see the token.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "stash_session";

/// Build the session cookie for a freshly issued token.
#[must_use]
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Build the cookie used to clear the session on logout.
///
/// Attributes must match [`session_cookie`] for browsers to drop the right
/// cookie.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
