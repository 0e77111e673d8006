//! # Session Error Types
//!
//! Failures of the editing/commit flow. Allocation and validation errors
//! bubble up from the core crate unchanged; commit errors come back from
//! the persistence collaborator.

use mostrador_core::error::{AllocationError, ValidationError};
use thiserror::Error;

// =============================================================================
// Commit Error
// =============================================================================

/// Rejections surfaced by the persistence collaborator at commit time.
///
/// The snapshot an allocation was computed from may be stale by the time
/// it is committed; the collaborator re-validates and atomically decrements
/// stock, or rejects. This engine never retries on its own — the session
/// surfaces the rejection so the UI can refresh the snapshot and let the
/// cashier decide.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    /// Underlying stock changed incompatibly since the snapshot was read
    /// (e.g. another terminal sold from the same lot first).
    #[error("Stale stock for lot {lot_id:?}: {detail}")]
    StaleStock {
        lot_id: Option<i64>,
        detail: String,
    },

    /// Any other rejection (constraint violation, closed order, ...).
    #[error("Commit rejected: {reason}")]
    Rejected { reason: String },
}

// =============================================================================
// Session Error
// =============================================================================

/// Top-level error for the item editor flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Line inputs failed validation before allocation ran.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The allocator could not cover the request.
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// The persistence collaborator rejected the allocation.
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    /// Committing requires an order that already exists in the store.
    #[error("Order has no persisted id yet")]
    OrderNotPersisted,
}

// =============================================================================
// Unit Tests
// =============================================================================
