//! # Unit Conversion
//!
//! Converts between a product's *base unit* (the atomic stock-tracking
//! unit) and its *presentation unit* (the unit a price/quantity is
//! expressed in).
//!
//! ## Example
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product: Beer                                                          │
//! │    Base unit:          bottle                                           │
//! │    Presentation:       case of 12   (bulk_equivalence = 12)             │
//! │                                                                         │
//! │    to_base(3 cases, 12)          → 36 bottles                           │
//! │    to_presentation(36 bottles,12)→ 3 cases                              │
//! │                                                                         │
//! │  Product: Cheese (sold by weight)                                       │
//! │    Presentation = base = kg       (bulk_equivalence = None)             │
//! │    to_base(2.35, None)           → 2.35  (identity)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing or non-positive equivalence is treated as 1:1 — the snapshot
//! carries `None` for single-unit presentations, and a zero/negative value
//! from a malformed row must never divide.

// =============================================================================
// Conversions
// =============================================================================

/// Effective bulk equivalence: the supplied value when positive, else 1.
#[inline]
pub fn bqe_or_one(bulk_equivalence: Option<f64>) -> f64 {
    match bulk_equivalence {
        Some(e) if e > 0.0 => e,
        _ => 1.0,
    }
}

/// Converts a presentation-unit quantity to base units.
///
/// Identity when `bulk_equivalence` is absent or non-positive.
///
/// ## Example
/// ```rust
/// use mostrador_core::units::to_base;
///
/// assert_eq!(to_base(3.0, Some(12.0)), 36.0);
/// assert_eq!(to_base(3.0, None), 3.0);
/// ```
#[inline]
pub fn to_base(presentation_qty: f64, bulk_equivalence: Option<f64>) -> f64 {
    presentation_qty * bqe_or_one(bulk_equivalence)
}

/// Converts a base-unit quantity to presentation units.
///
/// Inverse of [`to_base`]: `to_presentation(to_base(x, e), e) == x` for all
/// `x` and positive `e`, modulo floating-point tolerance.
#[inline]
pub fn to_presentation(base_qty: f64, bulk_equivalence: Option<f64>) -> f64 {
    base_qty / bqe_or_one(bulk_equivalence)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;

    #[test]
    fn test_to_base() {
        assert_eq!(to_base(3.0, Some(12.0)), 36.0);
        assert_eq!(to_base(0.5, Some(12.0)), 6.0);
        assert_eq!(to_base(3.0, None), 3.0);
    }

    #[test]
    fn test_non_positive_equivalence_is_identity() {
        assert_eq!(to_base(3.0, Some(0.0)), 3.0);
        assert_eq!(to_base(3.0, Some(-5.0)), 3.0);
        assert_eq!(to_presentation(3.0, Some(0.0)), 3.0);
        assert_eq!(to_presentation(3.0, Some(-5.0)), 3.0);
    }

    #[test]
    fn test_round_trip_law() {
        let quantities = [0.0, 0.001, 1.0, 2.347, 17.0, 99_999.5];
        let equivalences = [0.25, 1.0, 6.0, 12.0, 144.0];

        for &x in &quantities {
            for &e in &equivalences {
                let rt = to_presentation(to_base(x, Some(e)), Some(e));
                assert!(
                    (rt - x).abs() < EPSILON,
                    "round trip failed for x={x}, e={e}: got {rt}"
                );
            }
        }
    }

    #[test]
    fn test_bqe_or_one() {
        assert_eq!(bqe_or_one(Some(12.0)), 12.0);
        assert_eq!(bqe_or_one(Some(0.0)), 1.0);
        assert_eq!(bqe_or_one(None), 1.0);
    }
}
