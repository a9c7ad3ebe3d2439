//! Status and role enums for Relace entities.
//!
//! Order statuses keep their French wire values (`"En attente"`,
//! `"Confirmée"`, ...) because that is what the storefront, the admin view,
//! and existing order rows exchange. The Rust-side variant names are English.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// This is a plain value, not a state machine: the admin endpoint may set any
/// status directly. Stock deduction is guarded separately so that repeated
/// transitions into [`OrderStatus::Confirmed`] cannot double-deduct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    #[serde(rename = "En attente")]
    Pending,
    /// Confirmed by an admin; stock is deducted on this transition.
    #[serde(rename = "Confirmée")]
    Confirmed,
    /// Being picked and packed.
    #[serde(rename = "En préparation")]
    Preparing,
    /// Handed to the carrier.
    #[serde(rename = "Expédiée")]
    Shipped,
    /// Delivered to the client.
    #[serde(rename = "Livrée")]
    Delivered,
    /// Cancelled; short-circuits tracking.
    #[serde(rename = "Annulée")]
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order (cancelled last).
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The French wire value stored in the database and sent over HTTP.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Confirmed => "Confirmée",
            Self::Preparing => "En préparation",
            Self::Shipped => "Expédiée",
            Self::Delivered => "Livrée",
            Self::Cancelled => "Annulée",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "En attente" => Ok(Self::Pending),
            "Confirmée" => Ok(Self::Confirmed),
            "En préparation" => Ok(Self::Preparing),
            "Expédiée" => Ok(Self::Shipped),
            "Livrée" => Ok(Self::Delivered),
            "Annulée" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Client role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    /// Regular storefront customer.
    #[default]
    Customer,
    /// Full access to the admin order-management endpoints.
    Admin,
}

impl std::fmt::Display for ClientRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for ClientRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid client role: {s}")),
        }
    }
}

/// Client account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Account in good standing.
    #[default]
    Active,
    /// Login refused.
    Blocked,
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(format!("invalid client status: {s}")),
        }
    }
}

/// What a promo code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoKind {
    /// Percentage of the subtotal (value is 0-100).
    Percentage,
    /// Fixed amount off, capped at the subtotal.
    Fixed,
    /// No discount; shipping cost is zeroed instead.
    FreeShipping,
}

impl std::fmt::Display for PromoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Fixed => write!(f, "fixed"),
            Self::FreeShipping => write!(f, "free_shipping"),
        }
    }
}

impl std::str::FromStr for PromoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            "free_shipping" => Ok(Self::FreeShipping),
            _ => Err(format!("invalid promo kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_uses_french_wire_values() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "\"Expédiée\"");
        let back: OrderStatus = serde_json::from_str("\"En attente\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Pending);
    }

    #[test]
    fn order_status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("Inconnue".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn roles_round_trip_through_str() {
        assert_eq!("admin".parse::<ClientRole>(), Ok(ClientRole::Admin));
        assert_eq!("customer".parse::<ClientRole>(), Ok(ClientRole::Customer));
        assert!("root".parse::<ClientRole>().is_err());
    }
}
