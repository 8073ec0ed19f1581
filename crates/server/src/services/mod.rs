//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, login/logout, credential hashing, session tokens

pub mod auth;
