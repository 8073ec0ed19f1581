//! Place route handlers.
//!
//! Places are always scoped to the authenticated user; names are unique per
//! owner but freely shared across owners.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use super::require_field;
use crate::db::PlaceRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Place;
use crate::state::AppState;

/// Body for creating or renaming a place.
#[derive(Debug, Deserialize)]
pub struct PlaceRequest {
    pub name: Option<String>,
}

/// List the authenticated user's places.
pub async fn list(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Place>>> {
    let places = PlaceRepository::new(state.pool())
        .list_by_user(current.id)
        .await?;
    Ok(Json(places))
}

/// Create a place.
///
/// # Errors
///
/// 400 for a missing name, 409 when the user already has a place with this
/// name.
pub async fn create(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<PlaceRequest>,
) -> Result<Json<Place>> {
    let name = require_field(body.name, "name")?;

    let places = PlaceRepository::new(state.pool());
    if places
        .get_by_user_and_name(current.id, &name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!("place '{name}' already exists")));
    }

    let place = places.create(current.id, &name).await?;

    tracing::info!(user_id = %current.id, place = %place.name, "place created");

    Ok(Json(place))
}

/// Rename a place.
///
/// # Errors
///
/// 400 for a missing name, 404 when no place has the old name, 409 when the
/// new name is already taken.
pub async fn rename(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<PlaceRequest>,
) -> Result<Json<Place>> {
    let new_name = require_field(body.name, "name")?;

    let places = PlaceRepository::new(state.pool());
    if new_name != name
        && places
            .get_by_user_and_name(current.id, &new_name)
            .await?
            .is_some()
    {
        return Err(AppError::Conflict(format!(
            "place '{new_name}' already exists"
        )));
    }

    let place = places.rename(current.id, &name, &new_name).await?;

    Ok(Json(place))
}

/// Delete a place, returning the deleted record.
///
/// The place's products are deleted with it.
///
/// # Errors
///
/// 404 when the user has no place with this name.
pub async fn delete(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Place>> {
    let deleted = PlaceRepository::new(state.pool())
        .delete_by_name(current.id, &name)
        .await?;

    tracing::info!(user_id = %current.id, place = %deleted.name, "place deleted");

    Ok(Json(deleted))
}
