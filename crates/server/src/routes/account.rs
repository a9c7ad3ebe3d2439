//! Account route handlers (profile and order history).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{ClientRepository, OrderRepository};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Client, Order, OrderWithItems};
use crate::state::AppState;

/// Profile update body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Own profile, read fresh from the database.
#[instrument(skip(state, client))]
pub async fn show(
    RequireAuth(client): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Client>> {
    let client = ClientRepository::new(state.pool())
        .get_by_id(client.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".to_string()))?;

    Ok(Json(client))
}

/// Update own name/phone.
#[instrument(skip(state, client, body))]
pub async fn update(
    RequireAuth(client): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<Client>> {
    if let Some(name) = &body.name
        && name.trim().is_empty()
    {
        return Err(ApiError::BadRequest("name cannot be empty".to_string()));
    }

    let client = ClientRepository::new(state.pool())
        .update_profile(
            client.id,
            body.name.as_deref().map(str::trim),
            body.phone.as_deref().map(str::trim),
        )
        .await?;

    Ok(Json(client))
}

/// Own orders, newest first.
#[instrument(skip(state, client))]
pub async fn orders(
    RequireAuth(client): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_client(client.id)
        .await?;

    Ok(Json(orders))
}

/// Own order detail by order number, with items.
///
/// Another client's order number answers 404, not 403, so order numbers
/// cannot be probed for existence.
#[instrument(skip(state, client))]
pub async fn order_detail(
    RequireAuth(client): RequireAuth,
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderWithItems>> {
    let order = OrderRepository::new(state.pool())
        .get_by_number(&order_number)
        .await?
        .filter(|o| o.order.client_id == client.id)
        .ok_or_else(|| ApiError::NotFound(format!("order {order_number} not found")))?;

    Ok(Json(order))
}
