//! Integration tests for the storefront flow: cart, quote, checkout.
//!
//! Requires a running server with a migrated, seeded database.
//! Run with: `cargo test -p relace-integration-tests -- --ignored`

use relace_integration_tests::{
    add_first_product_to_cart, base_url, register_test_client, session_client,
};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn cart_merges_lines_and_updates_quantities() {
    let client = session_client();
    let product = add_first_product_to_cart(&client, 1).await;
    add_first_product_to_cart(&client, 2).await;

    // Same product + size added twice -> one line, quantity 3.
    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to read cart");

    assert_eq!(cart["items"].as_array().expect("items array").len(), 1);
    assert_eq!(cart["item_count"], 3);

    // Setting the quantity to zero removes the line.
    let size = product["sizes"][0].as_str().expect("size");
    let cart: Value = client
        .patch(format!("{}/cart/items", base_url()))
        .json(&json!({ "product_id": product["id"], "size": size, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update cart")
        .json()
        .await
        .expect("Failed to read cart");

    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn quote_reflects_the_shipping_table() {
    let client = session_client();
    add_first_product_to_cart(&client, 1).await;

    let quote: Value = client
        .get(format!("{}/checkout/quote?country=Suisse", base_url()))
        .send()
        .await
        .expect("Failed to quote")
        .json()
        .await
        .expect("Failed to read quote");

    // Amounts serialize as strings (rust_decimal serde-with-str).
    assert_eq!(quote["shipping_cost"], "19.99");
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn checkout_requires_a_session() {
    let client = session_client();
    add_first_product_to_cart(&client, 1).await;

    let resp = client
        .post(format!("{}/checkout", base_url()))
        .json(&json!({
            "shipping_address": "12 rue de Rivoli, 75001 Paris",
            "country": "France",
            "payment_method": "card",
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn checkout_creates_a_pending_order_and_clears_the_cart() {
    let client = session_client();
    register_test_client(&client).await;
    add_first_product_to_cart(&client, 1).await;

    let resp = client
        .post(format!("{}/checkout", base_url()))
        .json(&json!({
            "shipping_address": "12 rue de Rivoli, 75001 Paris",
            "country": "France",
            "payment_method": "card",
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to read order");

    assert_eq!(order["status"], "En attente");
    let order_number = order["order_number"].as_str().expect("order number");
    assert!(order_number.starts_with("ORD-"));
    assert_eq!(order["items"].as_array().expect("items").len(), 1);

    // Cart is spent.
    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to read cart");
    assert_eq!(cart["item_count"], 0);

    // The order shows up in the account history.
    let orders: Vec<Value> = client
        .get(format!("{}/account/orders", base_url()))
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");
    assert!(
        orders
            .iter()
            .any(|o| o["order_number"] == order["order_number"])
    );
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn checkout_with_an_empty_cart_is_a_bad_request() {
    let client = session_client();
    register_test_client(&client).await;

    let resp = client
        .post(format!("{}/checkout", base_url()))
        .json(&json!({
            "shipping_address": "12 rue de Rivoli, 75001 Paris",
            "country": "France",
            "payment_method": "card",
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to read error");
    assert_eq!(body["error"], "cart is empty");
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn unknown_promo_code_gets_a_verdict_not_an_error() {
    let client = session_client();
    add_first_product_to_cart(&client, 1).await;

    let resp = client
        .post(format!("{}/promo/validate", base_url()))
        .json(&json!({ "code": "DOES-NOT-EXIST" }))
        .send()
        .await
        .expect("Failed to validate promo");

    assert_eq!(resp.status(), StatusCode::OK);
    let verdict: Value = resp.json().await.expect("Failed to read verdict");
    assert_eq!(verdict["valid"], false);
    assert_eq!(verdict["reason"], "invalid promo code");
}
