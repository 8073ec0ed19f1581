//! Authentication gate and ownership check.
//!
//! Provides the extractor that turns the session cookie into an explicit
//! [`CurrentUser`] value for route handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use stash_core::UserId;

use super::session::SESSION_COOKIE;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Resolves the session cookie to a user record. A missing cookie or a token
/// no user holds rejects the request as unauthenticated; a store failure
/// surfaces as a server error, not as a client mistake.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .ok_or_else(|| AppError::Unauthenticated("missing session cookie".to_owned()))?;

        let user = UserRepository::new(state.pool())
            .get_by_session_token(&token)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("invalid session".to_owned()))?;

        Ok(Self(CurrentUser::from(user)))
    }
}

/// Ownership gate for self-service user endpoints.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the addressed user is not the
/// authenticated one - never a silent no-op.
pub fn ensure_owner(current: &CurrentUser, id: UserId) -> Result<(), AppError> {
    if current.id != id {
        return Err(AppError::Forbidden(
            "cannot modify another user's account".to_owned(),
        ));
    }
    Ok(())
}
