//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Auth
//! POST /auth/register           - Create an account
//! POST /auth/login              - Login, sets the session cookie
//! POST /auth/logout             - Logout, clears the session (requires auth)
//!
//! # Users (requires auth)
//! GET    /users                 - List all users
//! GET    /users/me              - The authenticated user
//! PATCH  /users/{id}            - Rename own account (owner only)
//! DELETE /users/{id}            - Delete own account (owner only)
//!
//! # Places (requires auth, scoped to the authenticated user)
//! GET    /places                - List own places
//! POST   /places                - Create a place
//! PATCH  /places/{name}         - Rename a place
//! DELETE /places/{name}         - Delete a place (and its products)
//!
//! # Products (requires auth, scoped via ?place=NAME)
//! GET    /products?place=NAME          - List a place's products
//! POST   /products?place=NAME          - Add a product
//! PATCH  /products/{name}?place=NAME   - Update a product
//! DELETE /products/{name}?place=NAME   - Remove a product
//! ```

pub mod auth;
pub mod places;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/me", get(users::me))
        .route("/{id}", axum::routing::patch(users::update).delete(users::delete))
}

/// Create the place routes router.
pub fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(places::list).post(places::create))
        .route(
            "/{name}",
            axum::routing::patch(places::rename).delete(places::delete),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{name}",
            axum::routing::patch(products::update).delete(products::delete),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/places", place_routes())
        .nest("/products", product_routes())
}

/// Unwrap a required request field, rejecting absent or blank values.
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("missing field: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field_present() {
        let value = require_field(Some("Garage".to_string()), "name");
        assert_eq!(value.ok().as_deref(), Some("Garage"));
    }

    #[test]
    fn test_require_field_missing() {
        assert!(matches!(
            require_field(None, "name"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_require_field_blank() {
        assert!(matches!(
            require_field(Some("   ".to_string()), "name"),
            Err(AppError::BadRequest(_))
        ));
    }
}
