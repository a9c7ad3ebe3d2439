//! Client domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use relace_core::{ClientId, ClientRole, ClientStatus, Email};

/// A storefront client (domain type).
///
/// The password hash never leaves the repository layer; this type is safe to
/// serialize straight into API responses.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Validated email address.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Permission level (`customer` or `admin`).
    pub role: ClientRole,
    /// Account standing.
    pub status: ClientStatus,
    /// Number of orders placed, maintained at checkout.
    pub order_count: i32,
    /// Lifetime order total in EUR, maintained at checkout.
    pub order_total: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// True when this client may use the admin endpoints.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ClientRole::Admin
    }
}
