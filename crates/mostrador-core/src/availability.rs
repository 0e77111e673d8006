//! # Availability Accounting
//!
//! Answers: *"how much can I still add to THIS cart, right now, accounting
//! for what every open cart — including mine — has already claimed."*
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              compute_availability(snapshot, order lines)                │
//! │                                                                         │
//! │  lot/stock snapshot ──► Σ quantity            ─┐                        │
//! │  (this location)        Σ reserved_selling     │                        │
//! │                         Σ reserved_transfer    │                        │
//! │                                                ├─► available =          │
//! │  active order lines ──► Σ current cart (base) ─┤   max(0, total        │
//! │  (all open carts)       Σ other carts (base)  ─┘        - everything)  │
//! │                                                                         │
//! │  plus per-presentation breakdowns:                                      │
//! │    "you already have N of this pack size in your cart"                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All figures are derived, no stored state. Inputs are never mutated; the
//! session re-invokes this whenever the order-line list or the lot/stock
//! snapshot changes. The "other carts" figure is a best-effort, eventually
//! consistent view refreshed on each poll — NOT a reservation lock; true
//! mutual exclusion on a lot belongs to the persistence layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LocationId, Lot, OrderId, OrderItem, PresentationId, ProductId};

// =============================================================================
// Availability Summary
// =============================================================================

/// Per-product, per-location availability aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AvailabilitySummary {
    /// Physical stock across all lots of the product at the location,
    /// base units.
    pub total_base_units: f64,

    /// Quantity claimed by in-flight sale workflows other than open carts.
    pub reserved_for_selling: f64,

    /// Quantity claimed by in-flight transfer workflows.
    pub reserved_for_transferring: f64,

    /// Base units already claimed by lines of the current cart.
    pub current_cart_base_units: f64,

    /// Base units claimed by lines of every other open cart.
    pub other_carts_base_units: f64,

    /// Truly available base units, clamped at zero. Never negative even if
    /// the snapshot is transiently inconsistent.
    pub available_base_units: f64,

    /// Presentation-unit quantity per pack size already in the current
    /// cart, keyed by presentation id.
    pub current_cart_by_presentation: HashMap<PresentationId, f64>,

    /// Same, across all other open carts.
    pub other_carts_by_presentation: HashMap<PresentationId, f64>,
}

impl AvailabilitySummary {
    /// Unclamped availability, for diagnostics.
    ///
    /// Goes negative exactly when the external data is inconsistent
    /// (e.g. reservation counters outran the stock decrement).
    pub fn raw_available_base_units(&self) -> f64 {
        self.total_base_units
            - self.reserved_for_selling
            - self.reserved_for_transferring
            - self.current_cart_base_units
            - self.other_carts_base_units
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes availability for `product_id` at `location_id` given the full
/// lot/stock snapshot and the global list of active order lines.
///
/// `order_items` must span **all open orders** system-wide, not just the
/// current one — that is what keeps concurrent terminals honest with each
/// other. Lines with `is_deleted` or status `Cancelled` are filtered out;
/// cancellations are represented as a cancel-flagged original plus a
/// negating compensator, so filtering both nets to zero contribution (a
/// property this engine relies on rather than re-derives).
pub fn compute_availability(
    lots: &[Lot],
    order_items: &[OrderItem],
    current_order_id: Option<OrderId>,
    product_id: Option<ProductId>,
    location_id: LocationId,
) -> AvailabilitySummary {
    let mut summary = AvailabilitySummary::default();

    for lot in lots {
        if let Some(stock) = lot.stock_at(location_id) {
            summary.total_base_units += stock.quantity;
            summary.reserved_for_selling += stock.reserved_for_selling_quantity;
            summary.reserved_for_transferring += stock.reserved_for_transferring_quantity;
        }
    }

    // Without a product there are no lines to attribute; the stock sums
    // above still describe the snapshot
    if let Some(product_id) = product_id {
        let active = order_items
            .iter()
            .filter(|oi| oi.is_active() && oi.product_id == product_id);

        for oi in active {
            let is_current = Some(oi.order_id) == current_order_id;
            if is_current {
                summary.current_cart_base_units += oi.qty_in_base_units;
                *summary
                    .current_cart_by_presentation
                    .entry(oi.product_presentation_id)
                    .or_insert(0.0) += oi.quantity;
            } else {
                summary.other_carts_base_units += oi.qty_in_base_units;
                *summary
                    .other_carts_by_presentation
                    .entry(oi.product_presentation_id)
                    .or_insert(0.0) += oi.quantity;
            }
        }
    }

    summary.available_base_units = summary.raw_available_base_units().max(0.0);
    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
