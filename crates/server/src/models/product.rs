//! Product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stash_core::{PlaceId, ProductId};

/// An inventory item scoped to one place.
///
/// Quantity is free text ("2 boxes", "half a bag"), not a number. Names are
/// unique per place; the same name may exist in different places.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name, unique within its place.
    pub name: String,
    /// Free-text quantity.
    pub quantity: String,
    /// Free-text category ("Tools", "Food", ...).
    pub category: String,
    /// Place this product is stored in.
    pub place_id: PlaceId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
