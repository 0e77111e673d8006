//! # Commit Contract
//!
//! The boundary between the pure engine and the persistence layer.
//!
//! The engine computes an allocation from a snapshot that may already be
//! stale; the committer owns re-validation and the atomic stock decrement.
//! Two terminals selling the same lot race at THIS interface, nowhere
//! else — the pure functions above it never lock, block or retry.

use serde::{Deserialize, Serialize};

use mostrador_core::types::{Order, OrderItem, OrderItemId};

use crate::error::CommitError;

// =============================================================================
// Commit Receipt
// =============================================================================

/// What a successful commit hands back. Crosses the IPC boundary to the
/// frontend, so it carries the snake_case wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Persisted id of the order the lines were appended to.
    pub order_id: i64,
    /// Persisted ids of the appended lines, in allocation order.
    pub item_ids: Vec<OrderItemId>,
}

// =============================================================================
// Committer Trait
// =============================================================================

/// Durable persistence of an allocation.
///
/// ## Contract
/// - Must re-validate stock against current data and reject with
///   [`CommitError::StaleStock`] if it changed incompatibly since the
///   snapshot was read.
/// - Must apply the order update, line inserts and stock decrements
///   atomically — all or nothing.
/// - Reservation counters (`reserved_for_*`) are the committer's to
///   maintain; the engine only ever reads them.
pub trait OrderCommitter {
    fn commit(&mut self, order: &Order, items: &[OrderItem]) -> Result<CommitReceipt, CommitError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
