//! Request-level gates and session cookie plumbing.
//!
//! - [`auth`] - `RequireAuth` extractor (authentication gate) and the
//!   ownership check
//! - [`session`] - session cookie name and construction helpers

pub mod auth;
pub mod session;

pub use auth::{RequireAuth, ensure_owner};
pub use session::{SESSION_COOKIE, removal_cookie, session_cookie};
