//! # mostrador-core: Pure Allocation & Pricing Logic for Mostrador
//!
//! This crate is the **heart** of Mostrador. It contains the inventory
//! allocation and pricing-resolution engine as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mostrador Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │   Product UI ──► Item Editor UI ──► Cart UI ──► Checkout UI    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mostrador-session                            │   │
//! │  │    item editor state machine, commit-collaborator contract     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ mostrador-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌──────────────────┐  │   │
//! │  │  │  units  │ │ prices  │ │ allocation │ │   availability   │  │   │
//! │  │  │ to_base │ │ resolve │ │ FIFO lots  │ │ per-cart claims  │  │   │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Persistence layer (external collaborator)              │   │
//! │  │   fetches lot/price snapshots, commits allocations atomically   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Lot, Stock, Price, OrderItem, etc.)
//! - [`units`] - Base/presentation unit conversion
//! - [`prices`] - Price tier resolution (SPECIAL > LIMITED_OFFER > QUANTITY_DISCOUNT)
//! - [`allocation`] - FIFO lot allocation with oversell handling
//! - [`availability`] - Multi-cart reservation accounting
//! - [`orders`] - Order roll-ups and cancellation pairs
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same snapshot = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Time**: `now` is always a parameter, never read from a clock
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mostrador_core::units::{to_base, to_presentation};
//!
//! // A case of 12 bottles: presentation unit = case, base unit = bottle
//! let bottles = to_base(3.0, Some(12.0));
//! assert_eq!(bottles, 36.0);
//! assert_eq!(to_presentation(bottles, Some(12.0)), 3.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod availability;
pub mod error;
pub mod orders;
pub mod prices;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mostrador_core::Lot` instead of
// `use mostrador_core::types::Lot`

pub use allocation::{allocate, AllocationOptions, LineRequest};
pub use availability::{compute_availability, AvailabilitySummary};
pub use error::{AllocationError, CoreResult, ValidationError};
pub use prices::{resolve_effective_price, PriceResolution};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Comparison tolerance for quantity and money conservation checks.
///
/// ## Why f64 at all?
/// Weighed goods sell in fractional presentation units (2.347 kg of cheese),
/// and split-lot proration (`subtotal × drawn ÷ requested`) does not divide
/// evenly. All conservation invariants in this crate hold to within this
/// epsilon, matching what the backing store accepts.
pub const EPSILON: f64 = 1e-6;

/// Maximum quantity accepted for a single order line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., a scale glitch reporting
/// 14000 kg instead of 14). Can be made configurable per-location in
/// future versions.
pub const MAX_LINE_QUANTITY: f64 = 100_000.0;
