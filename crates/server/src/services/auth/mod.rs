//! Authentication service.
//!
//! Registration, password login, and session-token lifecycle. Passwords are
//! digested with Argon2id keyed with the process-wide secret; a login rotates
//! the user's single session token.

mod error;

pub use error::AuthError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use stash_core::{Email, UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{User, UserCredentials};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 5;

/// Raw byte length of a session token before base64 encoding.
const SESSION_TOKEN_BYTES: usize = 32;

// =============================================================================
// Credential Hasher
// =============================================================================

/// One-way, salted, secret-keyed password digests.
///
/// Built once at startup from the immutable configuration; the process-wide
/// secret is mixed into every digest as an Argon2 pepper, so stolen rows
/// cannot be attacked without it. Digests are deterministic for equal
/// (salt, password) inputs.
pub struct CredentialHasher {
    secret: SecretString,
}

impl CredentialHasher {
    /// Create a hasher keyed with the process-wide secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Build the Argon2id context keyed with the secret.
    fn context(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.secret.expose_secret().as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|_| AuthError::CredentialHash)
    }

    /// Derive the digest for a password under the given salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialHash` if hashing fails.
    pub fn digest(&self, salt: &SaltString, password: &str) -> Result<String, AuthError> {
        self.context()?
            .hash_password(password.as_bytes(), salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::CredentialHash)
    }

    /// Verify a password against a stored digest.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the digest is unparseable
    /// or the password does not match.
    pub fn verify(&self, password: &str, digest: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(digest).map_err(|_| AuthError::InvalidCredentials)?;
        self.context()?
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

// =============================================================================
// Session Token Issuer
// =============================================================================

/// Generate a fresh opaque session token.
///
/// 32 bytes from the OS-seeded RNG, URL-safe base64 encoded (43 chars).
#[must_use]
pub fn random_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

// =============================================================================
// Auth Service
// =============================================================================

/// Authentication service.
///
/// Handles user registration, login, and logout.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    hasher: &'a CredentialHasher,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, hasher: &'a CredentialHasher) -> Self {
        Self {
            users: UserRepository::new(pool),
            hasher,
        }
    }

    /// Register a new user with email, username, and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`/`InvalidUsername` on malformed
    /// input, `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let username = Username::parse(username)?;
        validate_password(password)?;

        // Friendly duplicate check; the unique constraint on email is the
        // backstop against concurrent registrations.
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let salt = SaltString::generate(&mut OsRng);
        let digest = self.hasher.digest(&salt, password)?;
        let credentials = UserCredentials {
            digest,
            salt: salt.as_str().to_owned(),
        };

        let user = self
            .users
            .create(&email, &username, &credentials)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// On success a fresh session token is stored on the user record,
    /// invalidating any prior token (single active session per user).
    /// Returns the user and the new token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is
    /// wrong. Nothing is mutated on a failed login.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let (user, credentials) = self
            .users
            .get_with_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.hasher.verify(password, &credentials.digest)?;

        let token = random_token();
        self.users.set_session_token(user.id, &token).await?;

        Ok((user, token))
    }

    /// Logout: clear the user's session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store operation fails.
    pub async fn logout(&self, user_id: UserId) -> Result<(), AuthError> {
        self.users.clear_session_token(user_id).await?;
        Ok(())
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_hasher() -> CredentialHasher {
        CredentialHasher::new(SecretString::from("kY8$vQ2!nB5@mX9#pL3&wD7*tF0^zH4j"))
    }

    fn fixed_salt() -> SaltString {
        SaltString::encode_b64(b"deterministic-salt").unwrap()
    }

    #[test]
    fn test_digest_is_deterministic_for_equal_inputs() {
        let hasher = test_hasher();
        let salt = fixed_salt();

        let a = hasher.digest(&salt, "secret1").unwrap();
        let b = hasher.digest(&salt, "secret1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_differs_for_different_passwords() {
        let hasher = test_hasher();
        let salt = fixed_salt();

        let a = hasher.digest(&salt, "secret1").unwrap();
        let b = hasher.digest(&salt, "secret2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_differs_for_different_salts() {
        let hasher = test_hasher();
        let other_salt = SaltString::encode_b64(b"another-salt-here").unwrap();

        let a = hasher.digest(&fixed_salt(), "secret1").unwrap();
        let b = hasher.digest(&other_salt, "secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_differs_under_different_secret() {
        let other = CredentialHasher::new(SecretString::from("qW3#eR5$tY7&uI9*oP1!aS2@dF4^gH6k"));
        let salt = fixed_salt();

        let a = test_hasher().digest(&salt, "secret1").unwrap();
        let b = other.digest(&salt, "secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_is_never_the_plaintext() {
        let hasher = test_hasher();
        let digest = hasher.digest(&fixed_salt(), "secret1").unwrap();
        assert!(!digest.contains("secret1"));
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let hasher = test_hasher();
        let digest = hasher.digest(&fixed_salt(), "secret1").unwrap();

        assert!(hasher.verify("secret1", &digest).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = test_hasher();
        let digest = hasher.digest(&fixed_salt(), "secret1").unwrap();

        assert!(matches!(
            hasher.verify("secret2", &digest),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_under_different_secret() {
        let other = CredentialHasher::new(SecretString::from("qW3#eR5$tY7&uI9*oP1!aS2@dF4^gH6k"));
        let digest = test_hasher().digest(&fixed_salt(), "secret1").unwrap();

        assert!(other.verify("secret1", &digest).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage_digest() {
        let hasher = test_hasher();
        assert!(matches!(
            hasher.verify("secret1", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_random_token_length() {
        // 32 bytes -> 43 chars of unpadded base64
        assert_eq!(random_token().len(), 43);
    }

    #[test]
    fn test_random_token_is_fresh_each_time() {
        assert_ne!(random_token(), random_token());
    }

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("abcd"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(validate_password("abcde").is_ok());
    }
}
