//! # Domain Types
//!
//! Core domain types used throughout Mostrador.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Lot        │   │     Stock       │   │     Price       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  lot_id         │   │  stock_id       │   │  price_id       │       │
//! │  │  created_at     │──►│  location_id    │   │  qty_per_price  │       │
//! │  │  cost figures   │1:N│  quantity       │   │  logic_type     │       │
//! │  └─────────────────┘   │  reservations   │   │  valid_until    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderItem     │   │     Order       │   │ MovementStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  order_number   │   │  Pending        │       │
//! │  │  over_sell_qty  │◄──│  location_id    │   │  Completed      │       │
//! │  │  lot_id/stock_id│N:1│  roll-up totals │   │  Cancelled      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Lots and Stock are owned by the inventory subsystem; this engine only
//! *reads* them. OrderItems are *produced* by the allocator; stock counters
//! are never mutated here (that is the persistence layer's job, applied
//! atomically at commit time).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Identifier Aliases
// =============================================================================
// The backing store uses numeric keys throughout. Aliases keep signatures
// readable without the ceremony of newtype wrappers on every call site.

pub type LotId = i64;
pub type StockId = i64;
pub type PriceId = i64;
pub type ProductId = i64;
pub type PresentationId = i64;
pub type LocationId = i64;
pub type OrderId = i64;
pub type OrderItemId = i64;
pub type ClientId = i64;
pub type ProviderId = i64;

// =============================================================================
// Price Classification
// =============================================================================

/// Pricing strategy attached to a price record.
///
/// ## Resolution Priority
/// The resolver applies these in a fixed priority order, checked
/// exhaustively at compile time (see [`crate::prices`]):
/// `Special` > `LimitedOffer` > `QuantityDiscount` > plain selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLogicType {
    /// Tiered pricing: the largest threshold not exceeding the quantity wins.
    QuantityDiscount,
    /// Client-negotiated price; always overrides quantity-based tiering.
    Special,
    /// Time-boxed promotional price with optional expiry.
    LimitedOffer,
}

/// Retail vs. wholesale price classification.
///
/// Filtering by this classification happens before resolution (the cashier
/// toggles it); the resolver itself never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceType {
    /// Retail ("minorista").
    Minor,
    /// Wholesale ("mayorista").
    Mayor,
}

// =============================================================================
// Movement Status
// =============================================================================

/// Lifecycle status of an order line.
///
/// A cancellation is never an in-place delete: the original line flips to
/// `Cancelled` and a compensating line with negated amounts is appended
/// (see [`crate::orders::cancellation_pair`]). Filtering both out nets to
/// zero contribution, preserving an append-only audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementStatus {
    /// Line recorded but the order is not finalized yet.
    Pending,
    /// Line finalized.
    Completed,
    /// Line cancelled; a negated compensator line accompanies it.
    Cancelled,
}

impl Default for MovementStatus {
    fn default() -> Self {
        MovementStatus::Pending
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Quantity of a lot available at a specific location.
///
/// ## Reservation Counters
/// `reserved_for_selling_quantity` and `reserved_for_transferring_quantity`
/// hold quantity provisionally committed by in-flight workflows *other than
/// the current cart*. They are read but never written by this engine; the
/// write path lives in the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub stock_id: StockId,
    pub lot_id: LotId,
    pub location_id: LocationId,

    /// Physical quantity on hand, in base units.
    pub quantity: f64,

    /// Quantity claimed by in-flight sale workflows.
    pub reserved_for_selling_quantity: f64,

    /// Quantity claimed by in-flight transfer workflows.
    pub reserved_for_transferring_quantity: f64,
}

impl Stock {
    /// Raw sellable quantity: on-hand minus both reservation counters.
    ///
    /// May be negative when the snapshot is transiently inconsistent.
    /// The raw figure is preserved for diagnostics; clamping to zero is
    /// applied only at the availability/display level.
    #[inline]
    pub fn sellable_quantity(&self) -> f64 {
        self.quantity - self.reserved_for_selling_quantity - self.reserved_for_transferring_quantity
    }
}

// =============================================================================
// Lot
// =============================================================================

/// A batch of physical stock of one product, created at a point in time.
///
/// `created_at` drives FIFO consumption: the oldest lot is drawn first.
/// Cost figures are carried through for margin reporting but never used by
/// the allocator itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lot {
    pub lot_id: LotId,

    /// Creation timestamp; the FIFO sort key.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    pub provider_id: Option<ProviderId>,

    pub final_cost_per_unit: Option<f64>,
    pub final_cost_per_bulk: Option<f64>,
    pub final_cost_total: Option<f64>,

    #[ts(as = "Option<String>")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Stock rows owned by this lot; at most one per location in practice.
    #[serde(default)]
    pub stock: Vec<Stock>,
}

impl Lot {
    /// Returns this lot's stock row at the given location, if any.
    ///
    /// A lot holds at most one stock row per location in practice; if the
    /// snapshot ever carries more, the first wins (stable with the order
    /// the backend returned them).
    pub fn stock_at(&self, location_id: LocationId) -> Option<&Stock> {
        self.stock.iter().find(|s| s.location_id == location_id)
    }

    /// Raw sellable quantity of this lot at the given location.
    ///
    /// Zero when the lot has no stock row there.
    pub fn sellable_at(&self, location_id: LocationId) -> f64 {
        self.stock_at(location_id)
            .map(Stock::sellable_quantity)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Price
// =============================================================================

/// A price record belonging to a product presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price {
    pub price_id: PriceId,
    pub product_presentation_id: PresentationId,

    /// Amount charged for `qty_per_price` presentation units.
    pub price: f64,

    /// Quantity threshold for tiered pricing. `None` means the record
    /// prices a single presentation unit.
    pub qty_per_price: Option<f64>,

    pub price_type: PriceType,
    pub logic_type: PriceLogicType,

    /// `None` = universal price, applies at every location unless
    /// suppressed via `disabled_location_ids`.
    pub location_id: Option<LocationId>,

    /// Expiry for `LimitedOffer` records; `None` = never expires.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Locations where this (universal) price is suppressed.
    #[serde(default)]
    pub disabled_location_ids: Vec<LocationId>,

    /// For `Special` prices: clients the price is restricted to.
    /// Empty = available to everyone.
    #[serde(default)]
    pub enabled_client_ids: Vec<ClientId>,
}

impl Price {
    /// Per-presentation-unit price.
    ///
    /// A missing or non-positive `qty_per_price` divides as 1 — division
    /// safety for records priced per single unit (and for malformed rows).
    pub fn unit_price(&self) -> f64 {
        match self.qty_per_price {
            Some(q) if q > 0.0 => self.price / q,
            _ => self.price,
        }
    }

    /// Tier threshold used when matching against a quantity.
    ///
    /// A missing threshold counts as 0: the record applies at any quantity.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.qty_per_price.unwrap_or(0.0)
    }

    /// Whether this record is expired at `now`.
    ///
    /// Only meaningful for `LimitedOffer`; other logic types never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.valid_until {
            Some(until) => until < now,
            None => false,
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of a sale, produced by the lot allocator at commit time.
///
/// ## Snapshot Pattern
/// Name and price fields are frozen copies taken when the line was built,
/// so the cart displays consistent data even if the catalog changes
/// underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Assigned by the persistence layer; `None` until committed.
    pub order_item_id: Option<OrderItemId>,
    pub order_id: OrderId,

    pub product_id: ProductId,
    pub product_name: String,
    pub product_presentation_id: PresentationId,
    pub product_presentation_name: String,

    /// Lot this line draws from; `None` in unified-lot mode.
    pub lot_id: Option<LotId>,
    /// Stock row this line draws from; `None` in unified-lot mode.
    pub stock_id: Option<StockId>,

    pub location_id: LocationId,

    /// Quantity drawn from real stock, in presentation units.
    pub quantity: f64,

    /// Quantity promised beyond available stock. Non-zero only on the last
    /// line of an allocation, and only when overselling was allowed.
    pub over_sell_quantity: f64,

    /// `quantity` converted to base units; consumed by the reservation
    /// tracker. Oversold quantity claims no physical stock and is excluded.
    pub qty_in_base_units: f64,

    /// Frozen per-presentation-unit price.
    pub price: f64,

    pub price_type: PriceType,
    pub logic_type: PriceLogicType,

    pub subtotal: f64,
    pub discount: Option<f64>,
    pub tax: Option<f64>,
    pub total: f64,

    pub status: MovementStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Backend soft-delete flag (distinct from cancellation).
    pub is_deleted: bool,
}

impl OrderItem {
    /// Whether this line contributes to reservation accounting.
    ///
    /// Cancelled lines and their negated compensators are both excluded,
    /// so a cancellation nets to zero across every aggregate.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_deleted && self.status != MovementStatus::Cancelled
    }

    /// Total quantity promised to the customer, including oversell.
    #[inline]
    pub fn promised_quantity(&self) -> f64 {
        self.quantity + self.over_sell_quantity
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle status of an order (cart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// A named, user-visible cart sharing a location and (optionally) a client.
///
/// Multiple orders may be open concurrently (multi-terminal, multi-tab);
/// the reservation tracker accounts for all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Assigned by the persistence layer; `None` until created.
    pub order_id: Option<OrderId>,
    /// Per-location sequential number shown to the user.
    pub order_number: i64,
    pub location_id: LocationId,
    pub client_id: Option<ClientId>,

    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,

    /// Roll-ups across line items; recomputed before commit
    /// (see [`crate::orders::OrderTotals`]).
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total_amount: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn price(logic_type: PriceLogicType, qty_per_price: Option<f64>, amount: f64) -> Price {
        Price {
            price_id: 1,
            product_presentation_id: 1,
            price: amount,
            qty_per_price,
            price_type: PriceType::Minor,
            logic_type,
            location_id: None,
            valid_until: None,
            disabled_location_ids: vec![],
            enabled_client_ids: vec![],
        }
    }

    #[test]
    fn test_unit_price_divides_by_threshold() {
        let p = price(PriceLogicType::QuantityDiscount, Some(10.0), 800.0);
        assert_eq!(p.unit_price(), 80.0);
    }

    #[test]
    fn test_unit_price_division_safety() {
        // Missing, zero and negative thresholds all divide as 1
        assert_eq!(price(PriceLogicType::Special, None, 100.0).unit_price(), 100.0);
        assert_eq!(price(PriceLogicType::Special, Some(0.0), 100.0).unit_price(), 100.0);
        assert_eq!(price(PriceLogicType::Special, Some(-3.0), 100.0).unit_price(), 100.0);
    }

    #[test]
    fn test_threshold_missing_counts_as_zero() {
        let p = price(PriceLogicType::QuantityDiscount, None, 100.0);
        assert_eq!(p.threshold(), 0.0);
    }

    #[test]
    fn test_price_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut p = price(PriceLogicType::LimitedOffer, Some(1.0), 90.0);

        p.valid_until = None;
        assert!(!p.is_expired(now));

        p.valid_until = Some(now + chrono::Duration::days(1));
        assert!(!p.is_expired(now));

        // valid_until exactly at `now` is still valid (>= now)
        p.valid_until = Some(now);
        assert!(!p.is_expired(now));

        p.valid_until = Some(now - chrono::Duration::seconds(1));
        assert!(p.is_expired(now));
    }

    #[test]
    fn test_stock_sellable_quantity_can_go_negative() {
        let stock = Stock {
            stock_id: 1,
            lot_id: 1,
            location_id: 1,
            quantity: 5.0,
            reserved_for_selling_quantity: 4.0,
            reserved_for_transferring_quantity: 3.0,
        };
        // Raw arithmetic preserved for diagnostics; clamping happens at
        // the availability level
        assert_eq!(stock.sellable_quantity(), -2.0);
    }

    #[test]
    fn test_lot_sellable_at_unknown_location_is_zero() {
        let lot = Lot {
            lot_id: 1,
            created_at: Utc::now(),
            provider_id: None,
            final_cost_per_unit: None,
            final_cost_per_bulk: None,
            final_cost_total: None,
            expiration_date: None,
            stock: vec![],
        };
        assert_eq!(lot.sellable_at(99), 0.0);
    }

    #[test]
    fn test_movement_status_wire_format() {
        // The frontend stores statuses as SCREAMING_SNAKE strings
        let json = serde_json::to_string(&MovementStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
        let json = serde_json::to_string(&PriceLogicType::LimitedOffer).unwrap();
        assert_eq!(json, "\"LIMITED_OFFER\"");
        let json = serde_json::to_string(&PriceType::Mayor).unwrap();
        assert_eq!(json, "\"MAYOR\"");
    }
}
