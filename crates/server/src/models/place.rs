//! Place domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stash_core::{PlaceId, UserId};

/// A named storage location owned by exactly one user.
///
/// Names are unique per owner; two users can each have a "Garage".
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    /// Unique place ID.
    pub id: PlaceId,
    /// Place name, unique within the owning user's places.
    pub name: String,
    /// Owning user.
    pub user_id: UserId,
    /// When the place was created.
    pub created_at: DateTime<Utc>,
    /// When the place was last updated.
    pub updated_at: DateTime<Utc>,
}
