//! Authentication route handlers.
//!
//! Registration, login (issues the session cookie), and logout.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::require_field;
use crate::error::Result;
use crate::middleware::{RequireAuth, removal_cookie, session_cookie};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields are optional so absence maps to a 400 with a field name rather
/// than a body-deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create a new account.
///
/// # Errors
///
/// 400 for missing/invalid fields, 409 when the email is already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<User>> {
    let email = require_field(body.email, "email")?;
    let password = require_field(body.password, "password")?;
    let username = require_field(body.username, "username")?;

    let auth = AuthService::new(state.pool(), state.hasher());
    let user = auth.register(&email, &username, &password).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(user))
}

/// Login with email and password.
///
/// On success the response carries the session cookie; any session the user
/// had before is invalidated.
///
/// # Errors
///
/// 400 for missing fields, 401 for wrong credentials.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>)> {
    let email = require_field(body.email, "email")?;
    let password = require_field(body.password, "password")?;

    let auth = AuthService::new(state.pool(), state.hasher());
    let (user, token) = auth.login(&email, &password).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok((jar.add(session_cookie(token)), Json(user)))
}

/// Logout the authenticated user.
///
/// Clears the server-side session token and expires the cookie.
pub async fn logout(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    let auth = AuthService::new(state.pool(), state.hasher());
    auth.logout(current.id).await?;

    tracing::info!(user_id = %current.id, "user logged out");

    Ok((jar.remove(removal_cookie()), StatusCode::NO_CONTENT))
}
