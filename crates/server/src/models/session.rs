//! Session-related types for authentication.

use serde::{Deserialize, Serialize};

use stash_core::{Email, UserId, Username};

use super::user::User;

/// The authenticated identity attached to a request.
///
/// Produced by the authentication gate after resolving the session cookie,
/// and threaded explicitly into every downstream handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's display name.
    pub username: Username,
    /// User's email address.
    pub email: Email,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}
