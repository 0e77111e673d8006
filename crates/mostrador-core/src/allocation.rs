//! # Lot Allocation
//!
//! Materializes a requested quantity into order-item records by consuming
//! lots under a FIFO policy, with an explicit oversell remainder policy.
//!
//! ## Allocation Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       allocate(request, lots, options)                  │
//! │                                                                         │
//! │  explicit lot_id? ──────► one item, full quantity, no split            │
//! │        │ no               (caller-forced; stock level ignored)         │
//! │        ▼                                                                │
//! │  any sellable stock? ───► no ──► oversell allowed?                     │
//! │        │ yes                      ├── no  → InsufficientStock          │
//! │        ▼                          └── yes → one item, qty=0,           │
//! │  sort lots oldest-first                     over_sell=requested        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  walk lots, draw min(available, remaining) from each,                  │
//! │  prorating subtotal/total by drawn ÷ requested                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  remainder left? ───────► oversell allowed?                            │
//! │                            ├── no  → InsufficientStock                 │
//! │                            └── yes → attach remainder to LAST item     │
//! │                                      (over_sell_quantity + prorated $) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `Σ item.quantity + last.over_sell_quantity == requested` (± epsilon)
//! - `Σ item.subtotal == request.subtotal` and same for `total` (± epsilon)
//! - Deterministic: stable sort on `created_at`, ties keep snapshot order
//!
//! Invoked once, at commit time. The snapshot may be stale by then; the
//! persistence collaborator re-validates and may reject with a stale-stock
//! error — this function never blocks or locks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{AllocationError, CoreResult};
use crate::types::{
    LocationId, Lot, LotId, MovementStatus, OrderId, OrderItem, PresentationId, PriceLogicType,
    PriceType, ProductId, Stock,
};
use crate::units::to_base;
use crate::EPSILON;

// =============================================================================
// Allocation Inputs
// =============================================================================

/// The line template an allocation is built from.
///
/// Carries the already-resolved pricing and the frozen display snapshot;
/// the allocator splits it across lots without changing its economics.
/// `quantity` is in presentation units (the allocation's working unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRequest {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_presentation_id: PresentationId,
    pub product_presentation_name: String,
    pub location_id: LocationId,

    /// Requested quantity, presentation units.
    pub quantity: f64,

    /// Resolved per-presentation-unit price.
    pub price: f64,
    pub price_type: PriceType,
    pub logic_type: PriceLogicType,

    /// Line subtotal for the full requested quantity.
    pub subtotal: f64,
    /// Line total for the full requested quantity.
    pub total: f64,

    /// Presentation → base unit factor; `None` for 1:1 presentations.
    pub bulk_quantity_equivalence: Option<f64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: MovementStatus,
}

/// Caller knobs for an allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AllocationOptions {
    /// Explicit lot override: bypass FIFO and draw the full quantity from
    /// this lot, regardless of its stock level.
    pub lot_id: Option<LotId>,

    /// Permit demand beyond available stock. When false, a shortfall is a
    /// hard [`AllocationError::InsufficientStock`].
    pub allow_over_selling: bool,
}

// =============================================================================
// Allocation
// =============================================================================

/// Allocates `request.quantity` across `lots` and returns the order items
/// that materialize the sale.
///
/// See the module docs for the path taken per input shape. For a fixed
/// snapshot and request the output is identical on every call.
pub fn allocate(
    request: &LineRequest,
    lots: &[Lot],
    options: &AllocationOptions,
) -> CoreResult<Vec<OrderItem>> {
    // Zero-quantity edge: nothing to materialize, not an error (the caller
    // may be mid-edit)
    if request.quantity <= 0.0 {
        return Ok(Vec::new());
    }

    // Caller-forced lot: no FIFO, no partial split, stock level ignored
    if let Some(lot_id) = options.lot_id {
        let lot = lots
            .iter()
            .find(|l| l.lot_id == lot_id)
            .ok_or(AllocationError::LotNotFound { lot_id })?;
        let item = build_item(request, Some(lot), request.quantity, 1.0);
        return Ok(vec![item]);
    }

    // No sellable stock anywhere: the entire request is unmet demand
    let has_sellable = lots
        .iter()
        .any(|l| l.sellable_at(request.location_id) > 0.0);
    if !has_sellable {
        if !options.allow_over_selling {
            return Err(AllocationError::InsufficientStock {
                requested: request.quantity,
                available: 0.0,
            });
        }
        let mut item = build_item(request, None, 0.0, 1.0);
        item.over_sell_quantity = request.quantity;
        // Flagged as finalized unmet demand, regardless of the template
        // status
        item.status = MovementStatus::Completed;
        return Ok(vec![item]);
    }

    // FIFO: oldest lot first. Vec::sort_by is stable, so lots sharing a
    // creation timestamp keep their snapshot order.
    let mut ordered: Vec<&Lot> = lots.iter().collect();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let mut items: Vec<OrderItem> = Vec::new();
    let mut remaining = request.quantity;

    for lot in ordered {
        if remaining <= EPSILON {
            break;
        }
        let available = lot.sellable_at(request.location_id);
        if available <= 0.0 {
            continue;
        }

        let drawn = available.min(remaining);
        let fraction = drawn / request.quantity;
        items.push(build_item(request, Some(lot), drawn, fraction));
        remaining -= drawn;
    }

    if remaining > EPSILON {
        if !options.allow_over_selling {
            return Err(AllocationError::InsufficientStock {
                requested: request.quantity,
                available: request.quantity - remaining,
            });
        }

        // Attach the shortfall to the last emitted item, with its share of
        // the line economics. NOTE: this merges "real stock sold" and
        // "promised-but-unfulfilled" in one record; downstream accounting
        // expects the merged shape.
        let fraction = remaining / request.quantity;
        let last = items
            .last_mut()
            .ok_or(AllocationError::NoBaseAllocation {
                requested: request.quantity,
            })?;
        last.over_sell_quantity = remaining;
        last.subtotal += request.subtotal * fraction;
        last.total += request.total * fraction;
    }

    Ok(items)
}

/// Builds one order item drawing `quantity` from `lot` (or from nowhere,
/// for the pure-oversell case), carrying `fraction` of the line economics.
fn build_item(request: &LineRequest, lot: Option<&Lot>, quantity: f64, fraction: f64) -> OrderItem {
    OrderItem {
        order_item_id: None,
        order_id: request.order_id,
        product_id: request.product_id,
        product_name: request.product_name.clone(),
        product_presentation_id: request.product_presentation_id,
        product_presentation_name: request.product_presentation_name.clone(),
        lot_id: lot.map(|l| l.lot_id),
        stock_id: lot.and_then(|l| drawable_stock(l, request.location_id)).map(|s| s.stock_id),
        location_id: request.location_id,
        quantity,
        over_sell_quantity: 0.0,
        qty_in_base_units: to_base(quantity, request.bulk_quantity_equivalence),
        price: request.price,
        price_type: request.price_type,
        logic_type: request.logic_type,
        subtotal: request.subtotal * fraction,
        discount: None,
        tax: None,
        total: request.total * fraction,
        status: request.status,
        created_at: request.created_at,
        is_deleted: false,
    }
}

/// The stock row an item at this location draws from: the lot's first row
/// at the location that still has physical quantity.
fn drawable_stock(lot: &Lot, location_id: LocationId) -> Option<&Stock> {
    lot.stock
        .iter()
        .find(|s| s.location_id == location_id && s.quantity > 0.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
