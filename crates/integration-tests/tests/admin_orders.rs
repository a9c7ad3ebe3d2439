//! Integration tests for the admin order-management endpoints.
//!
//! Requires a running server, a seeded database, and an admin account whose
//! credentials are in `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD`.
//! Run with: `cargo test -p relace-integration-tests -- --ignored`

use relace_integration_tests::{
    add_first_product_to_cart, base_url, login_admin, register_test_client, session_client,
};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Place an order as a throwaway customer and return it.
async fn place_test_order() -> Value {
    let client = session_client();
    register_test_client(&client).await;
    add_first_product_to_cart(&client, 1).await;

    client
        .post(format!("{}/checkout", base_url()))
        .json(&json!({
            "shipping_address": "12 rue de Rivoli, 75001 Paris",
            "country": "France",
            "payment_method": "card",
        }))
        .send()
        .await
        .expect("Failed to checkout")
        .json()
        .await
        .expect("Failed to read order")
}

/// Fetch a product's current stock through the public catalog.
async fn stock_of(client: &Client, product_id: &Value) -> i64 {
    let product: Value = client
        .get(format!("{}/products/{}", base_url(), product_id))
        .send()
        .await
        .expect("Failed to get product")
        .json()
        .await
        .expect("Failed to read product");
    product["stock"].as_i64().expect("stock")
}

#[tokio::test]
#[ignore = "Requires running relace-server, seeded database, and admin credentials"]
async fn admin_endpoints_reject_customers_and_anonymous() {
    let anonymous = session_client();
    let resp = anonymous
        .get(format!("{}/admin/orders", base_url()))
        .send()
        .await
        .expect("Failed to hit admin endpoint");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let customer = session_client();
    register_test_client(&customer).await;
    let resp = customer
        .get(format!("{}/admin/orders", base_url()))
        .send()
        .await
        .expect("Failed to hit admin endpoint");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running relace-server, seeded database, and admin credentials"]
async fn admin_lists_orders_with_status_and_brand_filters() {
    let order = place_test_order().await;
    let brand = order["items"][0]["brand"].as_str().expect("brand");

    let admin = session_client();
    login_admin(&admin).await;

    // Status filter uses the French wire value.
    let orders: Vec<Value> = admin
        .get(format!("{}/admin/orders?status=En attente", base_url()))
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");
    assert!(orders.iter().all(|o| o["status"] == "En attente"));
    assert!(
        orders
            .iter()
            .any(|o| o["order_number"] == order["order_number"])
    );

    // Brand filter keeps orders containing that brand.
    let orders: Vec<Value> = admin
        .get(format!("{}/admin/orders?brand={brand}", base_url()))
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

    // An unknown status is refused, not silently ignored.
    let resp = admin
        .get(format!("{}/admin/orders?status=Inconnue", base_url()))
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running relace-server, seeded database, and admin credentials"]
async fn confirming_twice_deducts_stock_only_once() {
    let order = place_test_order().await;
    let order_id = order["id"].clone();
    let product_id = order["items"][0]["product_id"].clone();
    let quantity = order["items"][0]["quantity"].as_i64().expect("quantity");

    let admin = session_client();
    login_admin(&admin).await;

    let stock_before = stock_of(&admin, &product_id).await;

    // First confirmation deducts.
    let resp = admin
        .put(format!("{}/admin/orders/{order_id}/status", base_url()))
        .json(&json!({ "status": "Confirmée" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(stock_of(&admin, &product_id).await, stock_before - quantity);

    // Toggling away and back must not deduct again.
    for status in ["En attente", "Confirmée"] {
        let resp = admin
            .put(format!("{}/admin/orders/{order_id}/status", base_url()))
            .json(&json!({ "status": status }))
            .send()
            .await
            .expect("Failed to update status");
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert_eq!(stock_of(&admin, &product_id).await, stock_before - quantity);
}

#[tokio::test]
#[ignore = "Requires running relace-server, seeded database, and admin credentials"]
async fn stock_adjustment_applies_a_signed_delta_clamped_at_zero() {
    let admin = session_client();
    login_admin(&admin).await;

    let products: Vec<Value> = admin
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to read products");
    let product_id = products[0]["id"].clone();
    let before = products[0]["stock"].as_i64().expect("stock");

    let product: Value = admin
        .post(format!("{}/admin/products/{product_id}/stock", base_url()))
        .json(&json!({ "delta": 5 }))
        .send()
        .await
        .expect("Failed to adjust stock")
        .json()
        .await
        .expect("Failed to read product");
    assert_eq!(product["stock"].as_i64().expect("stock"), before + 5);

    // A huge subtraction clamps at zero instead of going negative.
    let product: Value = admin
        .post(format!("{}/admin/products/{product_id}/stock", base_url()))
        .json(&json!({ "delta": -1_000_000 }))
        .send()
        .await
        .expect("Failed to adjust stock")
        .json()
        .await
        .expect("Failed to read product");
    assert_eq!(product["stock"].as_i64().expect("stock"), 0);
}

#[tokio::test]
#[ignore = "Requires running relace-server, seeded database, and admin credentials"]
async fn promo_codes_can_be_created_and_listed() {
    let admin = session_client();
    login_admin(&admin).await;

    let code = format!("TEST{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let resp = admin
        .post(format!("{}/admin/promo-codes", base_url()))
        .json(&json!({
            "code": code,
            "kind": "percentage",
            "value": "15",
            "max_uses": 100,
        }))
        .send()
        .await
        .expect("Failed to create promo code");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate code conflicts.
    let resp = admin
        .post(format!("{}/admin/promo-codes", base_url()))
        .json(&json!({ "code": code, "kind": "percentage", "value": "15" }))
        .send()
        .await
        .expect("Failed to create promo code");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let codes: Vec<Value> = admin
        .get(format!("{}/admin/promo-codes", base_url()))
        .send()
        .await
        .expect("Failed to list promo codes")
        .json()
        .await
        .expect("Failed to read promo codes");
    assert!(codes.iter().any(|c| c["code"] == code.to_uppercase()));
}
