//! Integration tests for the public tracking endpoint.
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
async fn unknown_order_numbers_answer_404() {
    let client = session_client();
    let resp = client
        .get(format!("{}/tracking/ORD-DOESNOTX", base_url()))
        .send()
        .await
        .expect("Failed to get tracking");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to read error");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running relace-server and a seeded database"]
async fn a_fresh_order_tracks_as_received_with_one_step_done() {
    let client = session_client();
    register_test_client(&client).await;
    add_first_product_to_cart(&client, 1).await;

    let order: Value = client
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
        .expect("Failed to read order");

    let order_number = order["order_number"].as_str().expect("order number");

    // Tracking is public: no session needed.
    let tracking: Value = session_client()
        .get(format!("{}/tracking/{order_number}", base_url()))
        .send()
        .await
        .expect("Failed to get tracking")
        .json()
        .await
        .expect("Failed to read tracking");

    assert_eq!(tracking["status"], "En attente");
    assert_eq!(tracking["stage"], "received");
    assert!(tracking["estimated_delivery"].is_string());

    let steps = tracking["steps"].as_array().expect("steps");
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0]["done"], true);
    assert!(steps[1..].iter().all(|s| s["done"] == false));
}
