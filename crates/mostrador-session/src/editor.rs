//! # Item Editor Session
//!
//! Explicit state machine for editing one order line: quantity, price
//! tier, lot selection and the final commit hand-off.
//!
//! ## State & Messages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ItemEditorSession state                              │
//! │                                                                         │
//! │   snapshot:  filtered prices, lots (location-scoped)                   │
//! │   edits:     quantity, selected_price_id, unit price,                  │
//! │              selected_lot_id, selected_stock_id                        │
//! │                                                                         │
//! │   Message                    Effect                                     │
//! │   ─────────────────────      ──────────────────────────────────────     │
//! │   set_quantity(q)            re-resolve price tier for q               │
//! │   select_price(id)           freeze that record's unit price           │
//! │   set_manual_price(p)        override; clears the selection            │
//! │   select_lot(id?)            re-default the stock row                  │
//! │   replace_snapshot(..)       refilter + re-run auto-selection          │
//! │   commit_line(order, ..)     validate → allocate → OrderCommitter      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never fetches anything: snapshots are pushed in by the
//! caller (initially and on every refresh), mirroring how concurrent
//! terminals converge on the same availability figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mostrador_core::allocation::{allocate, AllocationOptions, LineRequest};
use mostrador_core::availability::{compute_availability, AvailabilitySummary};
use mostrador_core::prices::resolve_effective_price;
use mostrador_core::types::{
    ClientId, LocationId, Lot, LotId, MovementStatus, Order, OrderId, OrderItem, PresentationId,
    Price, PriceId, PriceLogicType, PriceType, ProductId, StockId,
};
use mostrador_core::validation::{validate_bulk_equivalence, validate_quantity, validate_unit_price};

use crate::commit::{CommitReceipt, OrderCommitter};
use crate::error::SessionError;
use crate::filter::filter_candidate_prices;

// =============================================================================
// Configuration
// =============================================================================

/// Immutable context for an editing session: which product/presentation is
/// being edited, where, for whom, and the behavioural knobs.
///
/// Arrives from the frontend over IPC when the editor dialog opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEditorConfig {
    pub location_id: LocationId,
    pub client_id: Option<ClientId>,

    pub product_id: ProductId,
    pub product_name: String,
    pub product_presentation_id: PresentationId,
    pub product_presentation_name: String,

    /// Presentation → base unit factor; `None` for 1:1 presentations.
    pub bulk_quantity_equivalence: Option<f64>,

    /// Retail/wholesale classification of this sale.
    pub price_type: PriceType,

    /// Hide the lot selector and allocate FIFO across all lots.
    pub unify_lots: bool,

    /// Permit demand beyond available stock at commit time.
    pub allow_over_selling: bool,

    /// Seed quantity (typically 1, or the scale's live weight).
    pub initial_quantity: f64,

    /// Seed unit price; acts as a manual override when supplied.
    pub initial_price: Option<f64>,
}

// =============================================================================
// Session
// =============================================================================

/// One in-progress order line being edited.
#[derive(Debug, Clone)]
pub struct ItemEditorSession {
    config: ItemEditorConfig,

    /// Candidate prices, already filtered for location/client/expiry.
    prices: Vec<Price>,
    /// Lot snapshot for the presentation at this location.
    lots: Vec<Lot>,

    quantity: f64,
    selected_price_id: Option<PriceId>,
    /// Unit price currently in effect (resolved or manually overridden).
    price: f64,
    selected_lot_id: Option<LotId>,
    selected_stock_id: Option<StockId>,
}

impl ItemEditorSession {
    /// Creates a session over the first snapshot, running auto-selection:
    /// first candidate price and first lot/stock row (skipped in
    /// unified-lot mode).
    pub fn new(
        config: ItemEditorConfig,
        prices: &[Price],
        lots: Vec<Lot>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = ItemEditorSession {
            quantity: config.initial_quantity,
            selected_price_id: None,
            price: 0.0,
            selected_lot_id: None,
            selected_stock_id: None,
            prices: filter_candidate_prices(prices, config.location_id, config.client_id, now),
            lots,
            config,
        };

        session.auto_select_price();
        session.auto_select_lot();

        // A seed price acts as a manual override of the auto-selection
        if let Some(initial) = session.config.initial_price {
            session.set_manual_price(initial);
        }

        session
    }

    /// Supplies a fresh snapshot (poll/refresh), refiltering and re-running
    /// auto-selection. The edited quantity survives; price and lot
    /// selections reset to the new snapshot's defaults.
    pub fn replace_snapshot(&mut self, prices: &[Price], lots: Vec<Lot>, now: DateTime<Utc>) {
        self.prices =
            filter_candidate_prices(prices, self.config.location_id, self.config.client_id, now);
        self.lots = lots;
        self.auto_select_price();
        self.auto_select_lot();
        debug!(
            candidates = self.prices.len(),
            lots = self.lots.len(),
            "snapshot replaced"
        );
    }

    fn auto_select_price(&mut self) {
        match self.prices.first() {
            Some(first) => {
                self.selected_price_id = Some(first.price_id);
                self.price = first.unit_price();
            }
            None => {
                self.selected_price_id = None;
                self.price = 0.0;
            }
        }
    }

    fn auto_select_lot(&mut self) {
        if self.config.unify_lots {
            self.selected_lot_id = None;
            self.selected_stock_id = None;
            return;
        }
        let first_lot = self.lots.first();
        self.selected_lot_id = first_lot.map(|l| l.lot_id);
        self.selected_stock_id = first_lot.and_then(|l| l.stock.first()).map(|s| s.stock_id);
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Updates the quantity and re-resolves the price tier for it.
    ///
    /// A manual price override survives as long as no tier matches (the
    /// resolver returns no id for a cleared selection).
    pub fn set_quantity(&mut self, quantity: f64, now: DateTime<Utc>) {
        self.quantity = quantity;
        let resolution =
            resolve_effective_price(quantity, self.selected_price_id, &self.prices, now);
        if let Some(price_id) = resolution.price_id {
            self.price = resolution.effective_price;
            self.selected_price_id = Some(price_id);
            debug!(quantity, price_id, price = self.price, "price re-tiered");
        }
    }

    /// Selects a specific price record. No-op when the id is not among the
    /// filtered candidates. Returns whether the selection took effect.
    pub fn select_price(&mut self, price_id: PriceId) -> bool {
        match self.prices.iter().find(|p| p.price_id == price_id) {
            Some(found) => {
                self.selected_price_id = Some(found.price_id);
                self.price = found.unit_price();
                true
            }
            None => false,
        }
    }

    /// Manually overrides the unit price, clearing the selected preset.
    pub fn set_manual_price(&mut self, price: f64) {
        self.price = price;
        self.selected_price_id = None;
    }

    /// Selects a lot (or clears the selection), re-defaulting the stock
    /// row to the lot's first one.
    pub fn select_lot(&mut self, lot_id: Option<LotId>) {
        self.selected_lot_id = lot_id;
        self.selected_stock_id = match lot_id {
            None => None,
            Some(id) => self
                .lots
                .iter()
                .find(|l| l.lot_id == id)
                .and_then(|l| l.stock.first())
                .map(|s| s.stock_id),
        };
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Stock shown next to the quantity input: the sum across all lots in
    /// unified mode, or the selected stock row's quantity.
    pub fn available_stock(&self) -> f64 {
        if self.config.unify_lots {
            return self
                .lots
                .iter()
                .flat_map(|l| l.stock.iter())
                .map(|s| s.quantity)
                .sum();
        }
        self.lots
            .iter()
            .find(|l| Some(l.lot_id) == self.selected_lot_id)
            .and_then(|l| {
                l.stock
                    .iter()
                    .find(|s| Some(s.stock_id) == self.selected_stock_id)
            })
            .map(|s| s.quantity)
            .unwrap_or(0.0)
    }

    /// Line subtotal: quantity × unit price.
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.price
    }

    /// Full availability accounting for this product at this location,
    /// given the global active order-line list.
    pub fn availability(
        &self,
        order_items: &[OrderItem],
        current_order_id: Option<OrderId>,
    ) -> AvailabilitySummary {
        compute_availability(
            &self.lots,
            order_items,
            current_order_id,
            Some(self.config.product_id),
            self.config.location_id,
        )
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Validates the edited line, materializes it through the FIFO
    /// allocator and hands the result to the persistence collaborator.
    pub fn commit_line<C: OrderCommitter>(
        &self,
        order: &Order,
        committer: &mut C,
        now: DateTime<Utc>,
    ) -> Result<CommitReceipt, SessionError> {
        let order_id = order.order_id.ok_or(SessionError::OrderNotPersisted)?;

        validate_quantity(self.quantity)?;
        validate_unit_price(self.price)?;
        validate_bulk_equivalence(self.config.bulk_quantity_equivalence)?;

        let request = self.build_line_request(order_id, now);
        let options = AllocationOptions {
            lot_id: if self.config.unify_lots {
                None
            } else {
                self.selected_lot_id
            },
            allow_over_selling: self.config.allow_over_selling,
        };

        let items = allocate(&request, &self.lots, &options)?;
        debug!(
            order_id,
            lines = items.len(),
            quantity = self.quantity,
            "allocation materialized"
        );

        let receipt = committer.commit(order, &items)?;
        info!(
            order_id = receipt.order_id,
            lines = receipt.item_ids.len(),
            subtotal = request.subtotal,
            "line committed"
        );
        Ok(receipt)
    }

    fn build_line_request(&self, order_id: OrderId, now: DateTime<Utc>) -> LineRequest {
        let logic_type = self
            .selected_price_id
            .and_then(|id| self.prices.iter().find(|p| p.price_id == id))
            .map(|p| p.logic_type)
            // Manual override has no record to inherit from; plain tiered
            // semantics is what the store expects for ad-hoc prices
            .unwrap_or(PriceLogicType::QuantityDiscount);

        LineRequest {
            order_id,
            product_id: self.config.product_id,
            product_name: self.config.product_name.clone(),
            product_presentation_id: self.config.product_presentation_id,
            product_presentation_name: self.config.product_presentation_name.clone(),
            location_id: self.config.location_id,
            quantity: self.quantity,
            price: self.price,
            price_type: self.config.price_type,
            logic_type,
            subtotal: self.subtotal(),
            total: self.subtotal(),
            bulk_quantity_equivalence: self.config.bulk_quantity_equivalence,
            created_at: now,
            // Committed cart lines are recorded as finalized movements;
            // Pending is reserved for lines still being assembled upstream
            status: MovementStatus::Completed,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn selected_price_id(&self) -> Option<PriceId> {
        self.selected_price_id
    }

    pub fn selected_lot_id(&self) -> Option<LotId> {
        self.selected_lot_id
    }

    pub fn selected_stock_id(&self) -> Option<StockId> {
        self.selected_stock_id
    }

    /// The filtered candidate prices, in snapshot order.
    pub fn candidate_prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
