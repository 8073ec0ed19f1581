//! Product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stash_core::{PlaceId, ProductId};

use super::{RepositoryError, map_unique_violation};
use crate::models::product::Product;

const PRODUCT_COLUMNS: &str = "id, name, quantity, category, place_id, created_at, updated_at";

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    quantity: String,
    category: String,
    place_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            quantity: row.quantity,
            category: row.category,
            place_id: PlaceId::new(row.place_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// Every query is scoped to a place; handlers resolve the place through
/// [`super::PlaceRepository`] first, which enforces ownership.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a place's products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_place(&self, place_id: PlaceId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE place_id = $1 ORDER BY created_at ASC"
        ))
        .bind(place_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Look up a product by name within a place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_place_and_name(
        &self,
        place_id: PlaceId,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE place_id = $1 AND name = $2"
        ))
        .bind(place_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Create a product in a place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the place already has a product
    /// with this name. Returns `RepositoryError::Database` for other errors.
    pub async fn create(
        &self,
        place_id: PlaceId,
        name: &str,
        quantity: &str,
        category: &str,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, quantity, category, place_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(quantity)
        .bind(category)
        .bind(place_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product name already exists in this place"))?;

        Ok(Product::from(row))
    }

    /// Update a product addressed by name within a place.
    ///
    /// All fields are replaced, including the name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the place has no product named
    /// `name`. Returns `RepositoryError::Conflict` if the new name is already
    /// taken in this place. Returns `RepositoryError::Database` for other
    /// errors.
    pub async fn update_by_name(
        &self,
        place_id: PlaceId,
        name: &str,
        new_name: &str,
        quantity: &str,
        category: &str,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET name = $1, quantity = $2, category = $3, updated_at = now() \
             WHERE place_id = $4 AND name = $5 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(new_name)
        .bind(quantity)
        .bind(category)
        .bind(place_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product name already exists in this place"))?;

        row.map_or(Err(RepositoryError::NotFound), |r| Ok(Product::from(r)))
    }

    /// Delete a product by name within a place, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the place has no product with
    /// this name. Returns `RepositoryError::Database` for other errors.
    pub async fn delete_by_name(
        &self,
        place_id: PlaceId,
        name: &str,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "DELETE FROM products WHERE place_id = $1 AND name = $2 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(place_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), |r| Ok(Product::from(r)))
    }
}
