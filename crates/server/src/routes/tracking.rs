//! Public order tracking by order number.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use relace_core::OrderStatus;
use relace_core::tracking::{
    ChecklistStep, TrackingStage, checklist, estimated_delivery, tracking_info,
};

use crate::db::OrderRepository;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Tracking response: the derived, display-only view of an order's status.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub order_number: String,
    pub status: OrderStatus,
    pub stage: TrackingStage,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub steps: Vec<ChecklistStep>,
}

/// Tracking lookup by public order number.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<TrackingResponse>> {
    let order = OrderRepository::new(state.pool())
        .get_by_number(&order_number)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {order_number} not found")))?
        .order;

    let info = tracking_info(order.status);

    Ok(Json(TrackingResponse {
        order_number: order.order_number,
        status: order.status,
        stage: info.stage,
        message: info.message,
        estimated_delivery: estimated_delivery(order.status, order.created_at),
        steps: checklist(order.status),
    }))
}
