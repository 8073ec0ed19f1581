//! Place repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stash_core::{PlaceId, UserId};

use super::{RepositoryError, map_unique_violation};
use crate::models::place::Place;

const PLACE_COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Internal row type for `PostgreSQL` place queries.
#[derive(Debug, sqlx::FromRow)]
struct PlaceRow {
    id: i32,
    name: String,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: PlaceId::new(row.id),
            name: row.name,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for place database operations.
///
/// Every query is scoped to an owning user; a place is never visible outside
/// its owner.
pub struct PlaceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlaceRepository<'a> {
    /// Create a new place repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's places, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Place>, RepositoryError> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    /// Look up one of a user's places by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user_and_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<Place>, RepositoryError> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE user_id = $1 AND name = $2"
        ))
        .bind(user_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Place::from))
    }

    /// Create a place for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a place
    /// with this name. Returns `RepositoryError::Database` for other errors.
    pub async fn create(&self, user_id: UserId, name: &str) -> Result<Place, RepositoryError> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "INSERT INTO places (name, user_id) VALUES ($1, $2) RETURNING {PLACE_COLUMNS}"
        ))
        .bind(name)
        .bind(user_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "place name already exists"))?;

        Ok(Place::from(row))
    }

    /// Rename one of a user's places.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no place named
    /// `old_name`. Returns `RepositoryError::Conflict` if `new_name` is
    /// already taken. Returns `RepositoryError::Database` for other errors.
    pub async fn rename(
        &self,
        user_id: UserId,
        old_name: &str,
        new_name: &str,
    ) -> Result<Place, RepositoryError> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "UPDATE places SET name = $1, updated_at = now() \
             WHERE user_id = $2 AND name = $3 \
             RETURNING {PLACE_COLUMNS}"
        ))
        .bind(new_name)
        .bind(user_id.as_i32())
        .bind(old_name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "place name already exists"))?;

        row.map_or(Err(RepositoryError::NotFound), |r| Ok(Place::from(r)))
    }

    /// Delete one of a user's places by name, returning the deleted record.
    ///
    /// Cascades to the place's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no place with this
    /// name. Returns `RepositoryError::Database` for other errors.
    pub async fn delete_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Place, RepositoryError> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "DELETE FROM places WHERE user_id = $1 AND name = $2 RETURNING {PLACE_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), |r| Ok(Place::from(r)))
    }
}
