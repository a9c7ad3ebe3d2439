//! Integration tests for Relace.
//!
//! # Running Tests
//!
//! These tests drive a real server over HTTP. They require:
//! - A running `PostgreSQL` database, migrated (`relace-cli migrate`) and
//!   seeded (`relace-cli seed`)
//! - The server running (`cargo run -p relace-server`)
//! - An admin account (`relace-cli admin create ...`) with its credentials in
//!   `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD`
//!
//! All tests are `#[ignore]`d so `cargo test` stays green without a server;
//! run them with `cargo test -p relace-integration-tests -- --ignored`.

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("RELACE_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with a cookie store, so the session (login + cart) persists
/// across requests like a browser.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh throwaway account and return its JSON body.
///
/// The email embeds a UUID so repeated runs never collide.
///
/// # Panics
///
/// Panics if the request fails or the account is not created.
pub async fn register_test_client(client: &Client) -> Value {
    let email = format!("test-{}@example.fr", uuid::Uuid::new_v4());
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({
            "name": "Test Client",
            "email": email,
            "password": "correct horse battery",
        }))
        .send()
        .await
        .expect("Failed to register test client");

    assert!(resp.status().is_success(), "register failed: {}", resp.status());
    resp.json().await.expect("Failed to read register response")
}

/// Log the admin account from `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD` in.
///
/// # Panics
///
/// Panics if the environment variables are missing or login fails.
pub async fn login_admin(client: &Client) {
    let email = std::env::var("TEST_ADMIN_EMAIL").expect("TEST_ADMIN_EMAIL not set");
    let password = std::env::var("TEST_ADMIN_PASSWORD").expect("TEST_ADMIN_PASSWORD not set");

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to login admin");

    assert!(resp.status().is_success(), "admin login failed: {}", resp.status());
}

/// Add the first in-stock catalog product to the session cart, returning the
/// product's JSON.
///
/// # Panics
///
/// Panics if the catalog is empty or the add fails.
pub async fn add_first_product_to_cart(client: &Client, quantity: u32) -> Value {
    let products: Vec<Value> = client
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to read products");

    let product = products
        .iter()
        .find(|p| p["stock"].as_i64().unwrap_or(0) > 0)
        .expect("No in-stock product in catalog (run `relace-cli seed`)")
        .clone();

    let size = product["sizes"][0].as_str().expect("product has sizes");

    let resp = client
        .post(format!("{}/cart/items", base_url()))
        .json(&json!({
            "product_id": product["id"],
            "size": size,
            "quantity": quantity,
        }))
        .send()
        .await
        .expect("Failed to add to cart");

    assert!(resp.status().is_success(), "add to cart failed: {}", resp.status());
    product
}
