//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mostrador-core errors (this file)                                     │
//! │  ├── AllocationError  - Lot allocation failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mostrador-session errors (separate crate)                             │
//! │  ├── CommitError      - Persistence collaborator rejections            │
//! │  └── SessionError     - Editor flow failures                           │
//! │                                                                         │
//! │  Flow: ValidationError → AllocationError → SessionError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (lot id, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a precise user-facing message, so the UI
//!    can distinguish "no stock at all" from "not enough for this lot"
//!
//! Pricing resolution deliberately has NO error type: a missing or
//! non-matching price degrades to a zero-price, no-id result, because the
//! user may be mid-edit with incomplete data.

use thiserror::Error;

// =============================================================================
// Allocation Error
// =============================================================================

/// Lot allocation failures.
///
/// These are synchronous return failures, never exceptions used for control
/// flow. The session layer inspects the variant to show a precise message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// Demand exceeds supply and overselling is disallowed.
    ///
    /// ## When This Occurs
    /// - FIFO walk exhausted every lot before covering the request
    /// - No lot has any sellable stock at the location
    ///
    /// ## User Workflow
    /// ```text
    /// Add line (qty: 10)
    ///      │
    ///      ▼
    /// FIFO walk: drew 6 across lots, 4 left uncovered
    ///      │
    ///      ▼
    /// InsufficientStock { requested: 10.0, available: 6.0 }
    ///      │
    ///      ▼
    /// UI shows: "Solo hay 6 disponibles"
    /// ```
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { requested: f64, available: f64 },

    /// An explicit lot override referenced a lot that is not in the
    /// candidate set.
    #[error("Lot not found: {lot_id}")]
    LotNotFound { lot_id: i64 },

    /// Positive quantity but no order item could be constructed.
    ///
    /// Defensive invariant check: the oversell remainder attaches to the
    /// last emitted item, so reaching the remainder step with zero items
    /// means the caller-visible contract was already broken upstream.
    #[error("No base allocation produced for requested quantity {requested}")]
    NoBaseAllocation { requested: f64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied values don't meet requirements.
/// Used for early validation before allocation or pricing runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be a finite number (not NaN or infinity).
    ///
    /// Scale hardware occasionally reports garbage; it must never reach
    /// the allocator.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AllocationError.
pub type CoreResult<T> = Result<T, AllocationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AllocationError::InsufficientStock {
            requested: 10.0,
            available: 6.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: available 6, requested 10"
        );

        let err = AllocationError::LotNotFound { lot_id: 42 };
        assert_eq!(err.to_string(), "Lot not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::NotFinite {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be a finite number");
    }

    #[test]
    fn test_errors_are_inspectable() {
        let err = AllocationError::InsufficientStock {
            requested: 5.0,
            available: 0.0,
        };
        // The session layer matches on variants, never on strings
        assert!(matches!(
            err,
            AllocationError::InsufficientStock { available, .. } if available == 0.0
        ));
    }
}
