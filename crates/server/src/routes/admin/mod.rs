//! Admin route handlers.
//!
//! Everything under `/admin` requires the `admin` role, enforced by the
//! [`crate::middleware::RequireAdmin`] extractor on each handler.

pub mod orders;
pub mod promo_codes;
pub mod stock;
