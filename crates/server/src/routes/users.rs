//! User route handlers.
//!
//! Listing, the `/users/me` lookup, and owner-only account management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use stash_core::{UserId, Username};

use super::require_field;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, ensure_owner};
use crate::models::{CurrentUser, User};
use crate::db::UserRepository;
use crate::state::AppState;

/// Body for renaming an account.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
}

/// List all registered users.
pub async fn list(
    RequireAuth(_current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Return the authenticated user.
pub async fn me(RequireAuth(current): RequireAuth) -> Json<CurrentUser> {
    Json(current)
}

/// Rename the addressed account.
///
/// # Errors
///
/// 403 unless the addressed account is the authenticated one, 400 for a
/// missing or invalid username, 404 if the account vanished meanwhile.
pub async fn update(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let id = UserId::new(id);
    ensure_owner(&current, id)?;

    let username = require_field(body.username, "username")?;
    let username =
        Username::parse(&username).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .update_username(id, &username)
        .await?;

    Ok(Json(user))
}

/// Delete the addressed account, returning the deleted record.
///
/// Cascades to the account's places and products.
///
/// # Errors
///
/// 403 unless the addressed account is the authenticated one, 404 if the
/// account vanished meanwhile.
pub async fn delete(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>> {
    let id = UserId::new(id);
    ensure_owner(&current, id)?;

    let deleted = UserRepository::new(state.pool()).delete(id).await?;

    tracing::info!(user_id = %id, "user deleted");

    Ok(Json(deleted))
}
