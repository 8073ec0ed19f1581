//! Integration tests for Stash.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply the schema
//! createdb stash && STASH_DATABASE_URL=postgres://localhost/stash \
//!     STASH_AUTH_SECRET=$(openssl rand -base64 32) \
//!     cargo run -p stash-server
//!
//! # Run integration tests against it
//! cargo test -p stash-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they require a running server
//! and a `PostgreSQL` database. The base URL is configurable via
//! `STASH_BASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STASH_BASE_URL").unwrap_or_else(|_| "http://localhost:3900".to_string())
}

/// Create an HTTP client that keeps session cookies.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email so test runs never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// Register an account, asserting success, and return the user body.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the registration.
pub async fn register(client: &Client, email: &str, username: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({"email": email, "username": username, "password": password}))
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_success(), "registration failed");
    resp.json().await.expect("Failed to read register response")
}

/// Login, asserting success, and return the user body. The session cookie
/// lands in the client's cookie store.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the login.
pub async fn login(client: &Client, email: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to login");

    assert!(resp.status().is_success(), "login failed");
    resp.json().await.expect("Failed to read login response")
}

/// Register a fresh account and log it in, returning the client's user body.
///
/// # Panics
///
/// Panics if registration or login fails.
pub async fn register_and_login(client: &Client, prefix: &str) -> Value {
    let email = unique_email(prefix);
    register(client, &email, "Test User", "secret1").await;
    login(client, &email, "secret1").await
}
