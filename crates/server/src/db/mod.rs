//! Database operations for the stash `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts plus credential material and the active session token
//! - `places` - Named storage locations, unique per `(user_id, name)`
//! - `products` - Inventory items, unique per `(place_id, name)`
//!
//! All queries are runtime-checked `query_as` calls against `FromRow` row
//! types; rows convert into the domain types in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! binary; the server runs them at startup.

pub mod places;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use places::PlaceRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `Conflict`, passing other errors
/// through as `Database`.
pub(crate) fn map_unique_violation(e: sqlx::Error, conflict: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict.to_owned());
    }
    RepositoryError::Database(e)
}
