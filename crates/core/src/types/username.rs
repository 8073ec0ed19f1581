//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is shorter than the minimum length.
    #[error("username must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is only whitespace.
    #[error("username cannot be blank")]
    Blank,
}

/// A display name chosen by the user.
///
/// ## Constraints
///
/// - Length: 2-50 characters
/// - Must contain at least one non-whitespace character
///
/// ## Examples
///
/// ```
/// use stash_core::Username;
///
/// assert!(Username::parse("Ann").is_ok());
/// assert!(Username::parse("a").is_err());      // too short
/// assert!(Username::parse("   ").is_err());    // blank
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum length of a username.
    pub const MIN_LENGTH: usize = 2;
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 50;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is shorter than 2 characters, longer
    /// than 50 characters, or entirely whitespace.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.chars().count() < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Username::parse("Ann").is_ok());
        assert!(Username::parse("ab").is_ok());
        assert!(Username::parse(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Username::parse("a"),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::parse(""),
            Err(UsernameError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Username::parse(&"x".repeat(51)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_blank() {
        assert!(matches!(Username::parse("   "), Err(UsernameError::Blank)));
    }

    #[test]
    fn test_display() {
        let name = Username::parse("Ann").unwrap();
        assert_eq!(format!("{name}"), "Ann");
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = Username::parse("Ann").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Ann\"");

        let parsed: Username = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, name);
    }
}
