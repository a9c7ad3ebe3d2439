//! Order status to tracking stage mapping.
//!
//! A fixed, total lookup from [`OrderStatus`] to a display stage, a customer
//! message, and an estimated-delivery offset. This is not a state machine:
//! nothing here constrains which status an admin may set next.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::OrderStatus;

/// Display-only tracking stage derived from the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStage {
    Received,
    Confirmed,
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

/// The five forward stages, in order. Cancellation is not a step.
const SEQUENCE: [TrackingStage; 5] = [
    TrackingStage::Received,
    TrackingStage::Confirmed,
    TrackingStage::Preparing,
    TrackingStage::Shipped,
    TrackingStage::Delivered,
];

/// What the tracking page shows for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingInfo {
    pub stage: TrackingStage,
    /// Customer-facing message (French, like the wire statuses).
    pub message: &'static str,
    /// Days from order date to estimated delivery, when one can be given.
    pub delivery_offset_days: Option<i64>,
}

/// Map a status to its tracking stage, message, and delivery offset.
#[must_use]
pub const fn tracking_info(status: OrderStatus) -> TrackingInfo {
    match status {
        OrderStatus::Pending => TrackingInfo {
            stage: TrackingStage::Received,
            message: "Votre commande a bien été reçue et attend sa confirmation.",
            delivery_offset_days: Some(7),
        },
        OrderStatus::Confirmed => TrackingInfo {
            stage: TrackingStage::Confirmed,
            message: "Votre commande est confirmée et va partir en préparation.",
            delivery_offset_days: Some(6),
        },
        OrderStatus::Preparing => TrackingInfo {
            stage: TrackingStage::Preparing,
            message: "Votre commande est en cours de préparation.",
            delivery_offset_days: Some(5),
        },
        OrderStatus::Shipped => TrackingInfo {
            stage: TrackingStage::Shipped,
            message: "Votre commande a été expédiée et arrive bientôt.",
            delivery_offset_days: Some(2),
        },
        OrderStatus::Delivered => TrackingInfo {
            stage: TrackingStage::Delivered,
            message: "Votre commande a été livrée. Bonne réception !",
            delivery_offset_days: None,
        },
        OrderStatus::Cancelled => TrackingInfo {
            stage: TrackingStage::Cancelled,
            message: "Votre commande a été annulée.",
            delivery_offset_days: None,
        },
    }
}

/// Estimated delivery date for an order, when one can be given.
#[must_use]
pub fn estimated_delivery(
    status: OrderStatus,
    ordered_at: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    tracking_info(status)
        .delivery_offset_days
        .map(|days| ordered_at + Duration::days(days))
}

/// One step of the derived tracking checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistStep {
    pub stage: TrackingStage,
    /// Customer-facing label (French).
    pub label: &'static str,
    pub done: bool,
}

/// The ordered five-step checklist for a status.
///
/// A step is complete when the current status is at or past it in the fixed
/// received → confirmed → preparing → shipped → delivered sequence. A
/// cancelled order short-circuits: every step is incomplete.
#[must_use]
pub fn checklist(status: OrderStatus) -> Vec<ChecklistStep> {
    let reached = match status {
        OrderStatus::Pending => 1,
        OrderStatus::Confirmed => 2,
        OrderStatus::Preparing => 3,
        OrderStatus::Shipped => 4,
        OrderStatus::Delivered => 5,
        OrderStatus::Cancelled => 0,
    };

    SEQUENCE
        .iter()
        .enumerate()
        .map(|(i, &stage)| ChecklistStep {
            stage,
            label: step_label(stage),
            done: i < reached,
        })
        .collect()
}

const fn step_label(stage: TrackingStage) -> &'static str {
    match stage {
        TrackingStage::Received => "Commande reçue",
        TrackingStage::Confirmed => "Confirmée",
        TrackingStage::Preparing => "En préparation",
        TrackingStage::Shipped => "Expédiée",
        TrackingStage::Delivered => "Livrée",
        TrackingStage::Cancelled => "Annulée",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_mapping_is_total() {
        for status in OrderStatus::ALL {
            // Every status yields a stage and a non-empty message.
            let info = tracking_info(status);
            assert!(!info.message.is_empty());
            assert_eq!(checklist(status).len(), 5);
        }
    }

    #[test]
    fn delivered_marks_all_five_steps_complete() {
        let info = tracking_info(OrderStatus::Delivered);
        assert_eq!(info.stage, TrackingStage::Delivered);
        assert!(checklist(OrderStatus::Delivered).iter().all(|s| s.done));
    }

    #[test]
    fn shipped_completes_four_of_five_steps() {
        let steps = checklist(OrderStatus::Shipped);
        let done: Vec<bool> = steps.iter().map(|s| s.done).collect();
        assert_eq!(done, [true, true, true, true, false]);
    }

    #[test]
    fn cancelled_short_circuits_every_step() {
        assert!(checklist(OrderStatus::Cancelled).iter().all(|s| !s.done));
        assert_eq!(
            tracking_info(OrderStatus::Cancelled).delivery_offset_days,
            None
        );
    }

    #[test]
    fn estimated_delivery_offsets_from_the_order_date() {
        let ordered_at = Utc::now();
        let eta = estimated_delivery(OrderStatus::Shipped, ordered_at).expect("offset exists");
        assert_eq!(eta - ordered_at, Duration::days(2));
        assert_eq!(estimated_delivery(OrderStatus::Delivered, ordered_at), None);
    }
}
