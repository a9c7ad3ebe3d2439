//! Session-stored types and keys.

use serde::{Deserialize, Serialize};

use relace_core::{ClientId, ClientRole, Email};

use crate::models::Client;

/// Keys under which values are stored in the tower-sessions session.
pub mod session_keys {
    /// The logged-in client ([`super::CurrentClient`]).
    pub const CURRENT_CLIENT: &str = "current_client";
    /// The cart (`relace_core::cart::Cart`).
    pub const CART: &str = "cart";
}

/// The logged-in client, as stored in the server-side session.
///
/// This is written only by the auth handlers after verifying credentials;
/// nothing client-supplied ever reaches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentClient {
    pub id: ClientId,
    pub name: String,
    pub email: Email,
    pub role: ClientRole,
}

impl From<&Client> for CurrentClient {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            email: client.email.clone(),
            role: client.role,
        }
    }
}
