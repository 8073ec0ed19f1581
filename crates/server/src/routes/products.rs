//! Product route handlers.
//!
//! Every product operation is scoped to a place, addressed by name through
//! the `?place=NAME` query parameter. Resolving the place through the
//! authenticated user is what keeps one user's inventory invisible to
//! another: an unknown or foreign place name is simply not found.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::require_field;
use crate::db::{PlaceRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Place, Product};
use crate::state::AppState;

/// Query parameter naming the place to operate in.
#[derive(Debug, Deserialize)]
pub struct PlaceQuery {
    pub place: Option<String>,
}

/// Body for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
}

/// Resolve the `?place=NAME` query to one of the authenticated user's places.
async fn resolve_place(
    state: &AppState,
    current: &CurrentUser,
    query: PlaceQuery,
) -> Result<Place> {
    let name = require_field(query.place, "place")?;

    PlaceRepository::new(state.pool())
        .get_by_user_and_name(current.id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("place '{name}' not found")))
}

/// List the products in a place.
///
/// # Errors
///
/// 400 without a `place` query, 404 for an unknown place or when the place
/// holds no products.
pub async fn list(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> Result<Json<Vec<Product>>> {
    let place = resolve_place(&state, &current, query).await?;

    let products = ProductRepository::new(state.pool())
        .list_by_place(place.id)
        .await?;

    if products.is_empty() {
        return Err(AppError::NotFound(format!(
            "no products found in place '{}'",
            place.name
        )));
    }

    Ok(Json(products))
}

/// Add a product to a place.
///
/// # Errors
///
/// 400 for missing fields, 404 for an unknown place, 409 when the place
/// already holds a product with this name.
pub async fn create(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let place = resolve_place(&state, &current, query).await?;

    let name = require_field(body.name, "name")?;
    let category = require_field(body.category, "category")?;
    let quantity = require_field(body.quantity, "quantity")?;

    let products = ProductRepository::new(state.pool());
    if products
        .get_by_place_and_name(place.id, &name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "product '{name}' already exists in place '{}'",
            place.name
        )));
    }

    let product = products.create(place.id, &name, &quantity, &category).await?;

    tracing::info!(
        user_id = %current.id,
        place = %place.name,
        product = %product.name,
        "product created"
    );

    Ok(Json(product))
}

/// Update a product, addressed by its current name.
///
/// All fields are replaced, including the name.
///
/// # Errors
///
/// 400 for missing fields, 404 for an unknown place or product, 409 when the
/// new name collides with another product in the place.
pub async fn update(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PlaceQuery>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let place = resolve_place(&state, &current, query).await?;

    let new_name = require_field(body.name, "name")?;
    let category = require_field(body.category, "category")?;
    let quantity = require_field(body.quantity, "quantity")?;

    let products = ProductRepository::new(state.pool());
    if new_name != name
        && products
            .get_by_place_and_name(place.id, &new_name)
            .await?
            .is_some()
    {
        return Err(AppError::Conflict(format!(
            "product '{new_name}' already exists in place '{}'",
            place.name
        )));
    }

    let product = products
        .update_by_name(place.id, &name, &new_name, &quantity, &category)
        .await?;

    Ok(Json(product))
}

/// Remove a product from a place, returning the deleted record.
///
/// # Errors
///
/// 400 without a `place` query, 404 for an unknown place or product.
pub async fn delete(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PlaceQuery>,
) -> Result<Json<Product>> {
    let place = resolve_place(&state, &current, query).await?;

    let deleted = ProductRepository::new(state.pool())
        .delete_by_name(place.id, &name)
        .await?;

    tracing::info!(
        user_id = %current.id,
        place = %place.name,
        product = %deleted.name,
        "product deleted"
    );

    Ok(Json(deleted))
}
