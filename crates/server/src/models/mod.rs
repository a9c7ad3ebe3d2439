//! Domain models for the Relace API.
//!
//! These types represent validated domain objects, separate from the raw
//! database row types that live in the repositories.

pub mod client;
pub mod order;
pub mod product;
pub mod promo;
pub mod session;

pub use client::Client;
pub use order::{Order, OrderItem, OrderWithItems};
pub use product::Product;
pub use promo::PromoCode;
pub use session::{CurrentClient, session_keys};
