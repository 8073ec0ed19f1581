//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stash_core::{Email, UserId, Username};

/// A registered user (domain type).
///
/// This is the shape returned by the API. Credential material (digest, salt,
/// session token) never appears here; it is loaded separately as
/// [`UserCredentials`] by the queries that need it.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub username: Username,
    /// User's email address.
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Stored credential material for a user.
///
/// The digest is always `digest(salt, plaintext)` keyed with the process-wide
/// secret - never the plaintext itself. Not `Serialize`: this type must not
/// leak into a response body.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// Salted, secret-keyed password digest (PHC string).
    pub digest: String,
    /// Per-user random salt.
    pub salt: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_without_credentials() {
        let user = User {
            id: UserId::new(1),
            username: Username::parse("Ann").unwrap(),
            email: Email::parse("a@b.com").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "Ann");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("digest").is_none());
        assert!(json.get("salt").is_none());
        assert!(json.get("session_token").is_none());
    }
}
