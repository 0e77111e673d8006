//! # Validation Module
//!
//! Input validation for quantities and monetary figures before they reach
//! the allocator or the resolver.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty input, negative sign)                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Finiteness (scale hardware can report NaN/garbage)                │
//! │  └── Range and sign rules                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence layer (external)                                 │
//! │  └── Stock re-validation at commit time                                │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested line quantity.
///
/// ## Rules
/// - Must be finite (scale glitches report NaN/∞)
/// - Must be positive (> 0)
/// - Must not exceed `MAX_LINE_QUANTITY`
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0.0,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a per-unit price.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a bulk equivalence when one is supplied.
///
/// ## Rules
/// - `None` is fine (1:1 presentation)
/// - A supplied value must be finite and positive
pub fn validate_bulk_equivalence(bqe: Option<f64>) -> ValidationResult<()> {
    let Some(bqe) = bqe else {
        return Ok(());
    };

    if !bqe.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "bulk_quantity_equivalence".to_string(),
        });
    }

    if bqe <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "bulk_quantity_equivalence".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1.0).is_ok());
        assert!(validate_quantity(0.001).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-1.0).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(validate_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok()); // free item
        assert!(validate_unit_price(1099.5).is_ok());

        assert!(validate_unit_price(-100.0).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_bulk_equivalence() {
        assert!(validate_bulk_equivalence(None).is_ok());
        assert!(validate_bulk_equivalence(Some(12.0)).is_ok());

        assert!(validate_bulk_equivalence(Some(0.0)).is_err());
        assert!(validate_bulk_equivalence(Some(-6.0)).is_err());
        assert!(validate_bulk_equivalence(Some(f64::NAN)).is_err());
    }
}
