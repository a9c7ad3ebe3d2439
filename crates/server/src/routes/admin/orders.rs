//! Admin order management: listing, detail, status updates.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use relace_core::{ClientId, Email, OrderId, OrderStatus};

use crate::db::orders::AdminOrderFilter;
use crate::db::{ClientRepository, OrderRepository};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Order, OrderItem};
use crate::state::AppState;

/// Admin orders listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// French wire value, e.g. "En attente".
    pub status: Option<String>,
    /// Keep orders containing at least one item of this brand.
    pub brand: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Client summary embedded in the admin order detail.
#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
    pub email: Email,
}

/// Admin order detail: the order, its items, and who placed it.
#[derive(Debug, Serialize)]
pub struct AdminOrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub client: Option<ClientSummary>,
}

/// Status update body. The status is the French wire value.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// Parse a wire status or answer 400.
fn parse_status(value: &str) -> Result<OrderStatus> {
    value
        .parse::<OrderStatus>()
        .map_err(ApiError::BadRequest)
}

/// Orders listing with optional status and brand filters.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let filter = AdminOrderFilter {
        status,
        brand: query.brand,
        limit: query.limit,
        offset: query.offset,
    };

    let orders = OrderRepository::new(state.pool()).list_admin(&filter).await?;
    Ok(Json(orders))
}

/// Order detail with items and client summary.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<AdminOrderDetail>> {
    let with_items = OrderRepository::new(state.pool())
        .get_with_items(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id} not found")))?;

    let client = ClientRepository::new(state.pool())
        .get_by_id(with_items.order.client_id)
        .await?
        .map(|c| ClientSummary {
            id: c.id,
            name: c.name,
            email: c.email,
        });

    Ok(Json(AdminOrderDetail {
        order: with_items.order,
        items: with_items.items,
        client,
    }))
}

/// Set an order's status.
///
/// Any status may be set directly (there is no enforced forward sequence),
/// but stock deduction happens exactly once, on the first transition into
/// "Confirmée", atomically with the status write.
#[instrument(skip(state, admin))]
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Order>> {
    let status = parse_status(&body.status)?;

    let order = OrderRepository::new(state.pool())
        .update_status(id, status)
        .await?;

    tracing::info!(
        order_id = %id,
        status = %status,
        admin = %admin.email,
        "Order status updated"
    );

    Ok(Json(order))
}
