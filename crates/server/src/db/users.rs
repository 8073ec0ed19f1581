//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stash_core::{Email, UserId, Username};

use super::{RepositoryError, map_unique_violation};
use crate::models::user::{User, UserCredentials};

/// Columns selected for every user query that returns a [`User`].
const USER_COLUMNS: &str = "id, username, email, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            username,
            email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for queries that also load credential material.
#[derive(Debug, sqlx::FromRow)]
struct UserAuthRow {
    id: i32,
    username: String,
    email: String,
    password_digest: String,
    password_salt: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user together with their stored credential material, by email.
    ///
    /// Used only by the login path; everything else loads the credential-free
    /// [`User`] shape.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(User, UserCredentials)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            "SELECT id, username, email, password_digest, password_salt, \
                    created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let credentials = UserCredentials {
            digest: r.password_digest,
            salt: r.password_salt,
        };
        let user = User::try_from(UserRow {
            id: r.id,
            username: r.username,
            email: r.email,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })?;

        Ok(Some((user, credentials)))
    }

    /// Resolve a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_session_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE session_token = $1"
        ))
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Create a new user with pre-hashed credential material.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        username: &Username,
        credentials: &UserCredentials,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, email, password_digest, password_salt) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(&credentials.digest)
        .bind(&credentials.salt)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        User::try_from(row)
    }

    /// Store a fresh session token on a user, invalidating any prior one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_session_token(
        &self,
        id: UserId,
        token: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET session_token = $1 WHERE id = $2")
            .bind(token)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Clear a user's session token (logout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn clear_session_token(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET session_token = NULL WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Update a user's display name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_username(
        &self,
        id: UserId,
        username: &Username,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET username = $1, updated_at = now() WHERE id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), User::try_from)
    }

    /// Delete a user, returning the deleted record.
    ///
    /// Cascades to the user's places and their products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UserId) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), User::try_from)
    }
}
