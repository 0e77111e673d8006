//! # Order Roll-ups and Cancellation
//!
//! Helpers the session layer uses when finalizing or amending a cart:
//! summing line items into order-level totals, and building the
//! compensating pair that represents a cancellation.
//!
//! ## Why a Compensating Pair?
//! The order-item table is append-only (audit trail). Removing a line is
//! therefore modeled as:
//! ```text
//!   original line  ──► status = CANCELLED           (kept, flagged)
//!   new line       ──► negated qty/price/subtotal/total, status = CANCELLED
//! ```
//! Every reader that filters out cancelled lines sees the pair net to zero;
//! every reader that doesn't (accounting exports) sees both movements.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{MovementStatus, OrderItem};

// =============================================================================
// Order Totals
// =============================================================================

/// Order-level roll-up across line items, recomputed before commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total_amount: f64,
}

impl OrderTotals {
    /// Sums every line, including cancellation pairs — their negated
    /// compensators cancel the originals arithmetically, so no filtering
    /// is needed here.
    pub fn from_items(items: &[OrderItem]) -> Self {
        let mut totals = OrderTotals::default();
        for item in items {
            totals.subtotal += item.subtotal;
            totals.discount += item.discount.unwrap_or(0.0);
            totals.tax += item.tax.unwrap_or(0.0);
            totals.total_amount += item.total;
        }
        totals
    }
}

impl From<&[OrderItem]> for OrderTotals {
    fn from(items: &[OrderItem]) -> Self {
        OrderTotals::from_items(items)
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Builds the compensating pair for a cancellation of `item`.
///
/// Returns `(flagged_original, compensator)`: the original with status
/// flipped to `Cancelled`, and a new line with negated quantity, price,
/// subtotal and total (also `Cancelled`, no persisted id yet).
///
/// The pair replaces an in-place delete; appending the compensator and
/// updating the original preserves the audit trail while netting to zero
/// in every active-line aggregate.
pub fn cancellation_pair(item: &OrderItem) -> (OrderItem, OrderItem) {
    let mut flagged = item.clone();
    flagged.status = MovementStatus::Cancelled;

    let mut compensator = item.clone();
    compensator.order_item_id = None;
    compensator.status = MovementStatus::Cancelled;
    compensator.quantity = -item.quantity;
    compensator.over_sell_quantity = -item.over_sell_quantity;
    compensator.qty_in_base_units = -item.qty_in_base_units;
    compensator.price = -item.price;
    compensator.subtotal = -item.subtotal;
    compensator.total = -item.total;

    (flagged, compensator)
}

// =============================================================================
// Unit Tests
// =============================================================================
