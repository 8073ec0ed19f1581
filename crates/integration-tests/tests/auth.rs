//! Integration tests for registration, login, and session lifecycle.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p stash-server)
//!
//! Run with: cargo test -p stash-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::json;

use stash_integration_tests::{base_url, client, login, register, unique_email};

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_register_login_me_roundtrip() {
    let client = client();
    let email = unique_email("roundtrip");

    let user = register(&client, &email, "Ann", "secret1").await;
    assert_eq!(user["email"], email);
    assert_eq!(user["username"], "Ann");
    // Credential material must never appear in a response body
    assert!(user.get("password").is_none());
    assert!(user.get("password_digest").is_none());
    assert!(user.get("salt").is_none());
    assert!(user.get("session_token").is_none());

    login(&client, &email, "secret1").await;

    let me = client
        .get(format!("{}/users/me", base_url()))
        .send()
        .await
        .expect("Failed to get /users/me");
    assert_eq!(me.status(), StatusCode::OK);
    let me: serde_json::Value = me.json().await.expect("Failed to read body");
    assert_eq!(me["email"], email);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_login_sets_session_cookie() {
    let client = client();
    let email = unique_email("cookie");
    register(&client, &email, "Ann", "secret1").await;

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({"email": email, "password": "secret1"}))
        .send()
        .await
        .expect("Failed to login");

    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("login must set a cookie")
        .to_str()
        .expect("cookie header must be ascii");
    assert!(set_cookie.starts_with("stash_session="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_register_duplicate_email_conflicts() {
    let client = client();
    let email = unique_email("duplicate");

    register(&client, &email, "Ann", "secret1").await;

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({"email": email, "username": "Ann Again", "password": "secret1"}))
        .send()
        .await
        .expect("Failed to send duplicate registration");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_failed_login_mutates_nothing() {
    let client = client();
    let email = unique_email("failed-login");
    register(&client, &email, "Ann", "secret1").await;
    login(&client, &email, "secret1").await;

    // Wrong password is rejected...
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({"email": email, "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to send bad login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // ...and the previous session still works.
    let me = client
        .get(format!("{}/users/me", base_url()))
        .send()
        .await
        .expect("Failed to get /users/me");
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_second_login_invalidates_first_session() {
    let email = unique_email("rotation");
    let first = client();
    register(&first, &email, "Ann", "secret1").await;
    login(&first, &email, "secret1").await;

    // A second login from another client rotates the token.
    let second = client();
    login(&second, &email, "secret1").await;

    let stale = first
        .get(format!("{}/users/me", base_url()))
        .send()
        .await
        .expect("Failed to get /users/me");
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

    let fresh = second
        .get(format!("{}/users/me", base_url()))
        .send()
        .await
        .expect("Failed to get /users/me");
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_logout_ends_the_session() {
    let client = client();
    let email = unique_email("logout");
    register(&client, &email, "Ann", "secret1").await;
    login(&client, &email, "secret1").await;

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let me = client
        .get(format!("{}/users/me", base_url()))
        .send()
        .await
        .expect("Failed to get /users/me");
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_update_other_user_is_forbidden() {
    let victim = client();
    let victim_user = stash_integration_tests::register_and_login(&victim, "victim").await;
    let victim_id = victim_user["id"].as_i64().expect("user id");

    let attacker = client();
    stash_integration_tests::register_and_login(&attacker, "attacker").await;

    let resp = attacker
        .patch(format!("{}/users/{victim_id}", base_url()))
        .json(&json!({"username": "Pwned"}))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = attacker
        .delete(format!("{}/users/{victim_id}", base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running stash server and PostgreSQL"]
async fn test_update_own_username() {
    let client = client();
    let me = stash_integration_tests::register_and_login(&client, "rename").await;
    let id = me["id"].as_i64().expect("user id");

    let resp = client
        .patch(format!("{}/users/{id}", base_url()))
        .json(&json!({"username": "Renamed"}))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = resp.json().await.expect("Failed to read body");
    assert_eq!(updated["username"], "Renamed");
}
