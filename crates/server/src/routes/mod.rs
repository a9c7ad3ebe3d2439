//! HTTP route handlers for the Relace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/register           - Create an account (sets session)
//! POST /auth/login              - Login (sets session)
//! POST /auth/logout             - Logout
//!
//! # Catalog
//! GET  /products                - Product listing (?brand=&category=&q=&limit=&offset=)
//! GET  /products/brands         - Distinct brand names
//! GET  /products/{id}           - Product detail
//!
//! # Cart (session-backed)
//! GET    /cart                  - Current cart
//! POST   /cart/items            - Add a line (merges on product+size)
//! PATCH  /cart/items            - Set a line's quantity (<= 0 removes)
//! DELETE /cart/items            - Remove a line
//! DELETE /cart                  - Clear the cart
//!
//! # Checkout
//! GET  /checkout/quote          - Price the session cart (?country=&code=)
//! POST /checkout                - Place an order (requires auth)
//! POST /promo/validate          - Promo verdict for the session cart
//!
//! # Tracking
//! GET  /tracking/{order_number} - Public tracking by order number
//!
//! # Account (requires auth)
//! GET  /account                 - Own profile
//! PUT  /account                 - Update name/phone
//! GET  /account/orders          - Own orders
//! GET  /account/orders/{order_number} - Own order with items
//!
//! # Admin (requires admin role)
//! GET  /admin/orders            - Orders (?status=&brand=&limit=&offset=)
//! GET  /admin/orders/{id}       - Order with items and client
//! PUT  /admin/orders/{id}/status - Set status (stock deducted on first confirm)
//! POST /admin/products/{id}/stock - Adjust stock by a signed delta
//! GET  /admin/promo-codes       - List promo codes
//! POST /admin/promo-codes       - Create a promo code
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod promo;
pub mod tracking;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/brands", get(products::brands))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route(
            "/items",
            post(cart::add).patch(cart::update).delete(cart::remove),
        )
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show).put(account::update))
        .route("/orders", get(account::orders))
        .route("/orders/{order_number}", get(account::order_detail))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}", get(admin::orders::show))
        .route("/orders/{id}/status", put(admin::orders::update_status))
        .route("/products/{id}/stock", post(admin::stock::adjust))
        .route(
            "/promo-codes",
            get(admin::promo_codes::index).post(admin::promo_codes::create),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .nest("/products", product_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout & promo
        .route("/checkout", post(checkout::place_order))
        .route("/checkout/quote", get(checkout::quote))
        .route("/promo/validate", post(promo::validate))
        // Tracking
        .route("/tracking/{order_number}", get(tracking::show))
        // Account
        .nest("/account", account_routes())
        // Auth
        .nest("/auth", auth_routes())
        // Admin
        .nest("/admin", admin_routes())
}
