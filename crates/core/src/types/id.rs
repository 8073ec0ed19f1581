//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use stash_core::define_id;
/// define_id!(UserId);
/// define_id!(PlaceId);
///
/// let user_id = UserId::new(1);
/// let place_id = PlaceId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = place_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(PlaceId);
define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_as_i32() {
        let id = UserId::new(42);
        assert_eq!(id.as_i32(), 42);
    }

    #[test]
    fn test_from_i32_roundtrip() {
        let id = PlaceId::from(7);
        let raw: i32 = id.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ProductId::new(3)), "3");
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");

        let parsed: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, id);
    }
}
