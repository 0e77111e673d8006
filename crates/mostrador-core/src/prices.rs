//! # Price Resolution
//!
//! Picks the single applicable price for a requested quantity under three
//! competing pricing strategies.
//!
//! ## Priority Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Resolution Priority                            │
//! │                                                                         │
//! │  1. Selected price is SPECIAL ────────► return it unconditionally      │
//! │                                          (negotiated price beats qty)  │
//! │                                                                         │
//! │  2. Any unexpired LIMITED_OFFER exists:                                 │
//! │     a. best LIMITED_OFFER tier ≤ qty ─► promotional tier               │
//! │     b. else best QUANTITY_DISCOUNT                                      │
//! │        tier ≤ qty ────────────────────► regular tier                   │
//! │     c. else ──────────────────────────► the offer's own base price     │
//! │                                                                         │
//! │  3. Selected price is QUANTITY_DISCOUNT:                                │
//! │     best tier ≤ qty, else the selected price itself                    │
//! │                                                                         │
//! │  4. Otherwise ────────────────────────► selected price unchanged       │
//! │                                                                         │
//! │  "best tier" = largest qty_per_price not exceeding the quantity;       │
//! │  equal thresholds keep the snapshot's original order (deterministic).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is a pure function of `(quantity, candidates, now)` and is
//! re-invoked on every quantity change to support live re-tiering as the
//! cashier types. It **never fails**: no selection or an empty candidate
//! list degrades to a zero-price, no-id result, because the user may be
//! mid-edit with incomplete data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Price, PriceId, PriceLogicType};

// =============================================================================
// Resolution Result
// =============================================================================

/// Outcome of a price resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceResolution {
    /// Per-presentation-unit price to charge; 0.0 when nothing matched.
    pub effective_price: f64,
    /// The winning price record, if any.
    pub price_id: Option<PriceId>,
}

impl PriceResolution {
    /// The "no price" result: zero effective price, no id.
    pub const fn none() -> Self {
        PriceResolution {
            effective_price: 0.0,
            price_id: None,
        }
    }

    fn from_price(price: &Price) -> Self {
        PriceResolution {
            effective_price: price.unit_price(),
            price_id: Some(price.price_id),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the applicable price for `quantity` presentation units.
///
/// `candidates` must already be filtered by presentation and price-type
/// classification (retail/wholesale) — that is the session layer's concern.
/// `now` is explicit so expiry checks stay pure and testable.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use mostrador_core::prices::resolve_effective_price;
///
/// // No selection yet: degrades, never errors
/// let r = resolve_effective_price(5.0, None, &[], Utc::now());
/// assert_eq!(r.price_id, None);
/// assert_eq!(r.effective_price, 0.0);
/// ```
pub fn resolve_effective_price(
    quantity: f64,
    selected_price_id: Option<PriceId>,
    candidates: &[Price],
    now: DateTime<Utc>,
) -> PriceResolution {
    let selected = match selected_price_id {
        Some(id) => candidates.iter().find(|p| p.price_id == id),
        None => None,
    };
    let Some(selected) = selected else {
        // No selection, empty candidate list, or a stale id that no longer
        // exists in the snapshot
        return PriceResolution::none();
    };

    // Step 1: SPECIAL always overrides quantity
    if selected.logic_type == PriceLogicType::Special {
        return PriceResolution::from_price(selected);
    }

    // Step 2: an unexpired LIMITED_OFFER takes priority over the selection
    if let Some(offer) = candidates
        .iter()
        .find(|p| p.logic_type == PriceLogicType::LimitedOffer && !p.is_expired(now))
    {
        if let Some(tier) = best_tier(candidates, PriceLogicType::LimitedOffer, quantity) {
            return PriceResolution::from_price(tier);
        }
        if let Some(tier) = best_tier(candidates, PriceLogicType::QuantityDiscount, quantity) {
            return PriceResolution::from_price(tier);
        }
        // Quantity too low for any tier: the promotional price still
        // applies at its base
        return PriceResolution::from_price(offer);
    }

    // Steps 3 and 4: exhaustive over the remaining logic types
    match selected.logic_type {
        PriceLogicType::QuantityDiscount => {
            match best_tier(candidates, PriceLogicType::QuantityDiscount, quantity) {
                Some(tier) => PriceResolution::from_price(tier),
                None => PriceResolution::from_price(selected),
            }
        }
        // An expired LIMITED_OFFER selection behaves as a plain price
        PriceLogicType::LimitedOffer => PriceResolution::from_price(selected),
        // Unreachable in practice (handled in step 1), kept for exhaustiveness
        PriceLogicType::Special => PriceResolution::from_price(selected),
    }
}

/// Best matching tier: largest `qty_per_price` not exceeding `quantity`
/// among candidates of the given logic type.
///
/// Equal thresholds keep the first occurrence in snapshot order, so
/// resolution is deterministic for a fixed candidate list.
fn best_tier(candidates: &[Price], logic_type: PriceLogicType, quantity: f64) -> Option<&Price> {
    let mut best: Option<&Price> = None;
    for price in candidates
        .iter()
        .filter(|p| p.logic_type == logic_type && p.threshold() <= quantity)
    {
        match best {
            None => best = Some(price),
            Some(current) if price.threshold() > current.threshold() => best = Some(price),
            Some(_) => {}
        }
    }
    best
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceType;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn price(
        price_id: PriceId,
        logic_type: PriceLogicType,
        qty_per_price: Option<f64>,
        amount: f64,
    ) -> Price {
        Price {
            price_id,
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
    fn test_no_selection_degrades_to_none() {
        let candidates = [price(1, PriceLogicType::QuantityDiscount, Some(1.0), 100.0)];
        assert_eq!(
            resolve_effective_price(5.0, None, &candidates, now()),
            PriceResolution::none()
        );
        assert_eq!(
            resolve_effective_price(5.0, Some(1), &[], now()),
            PriceResolution::none()
        );
    }

    #[test]
    fn test_stale_selection_degrades_to_none() {
        let candidates = [price(1, PriceLogicType::QuantityDiscount, Some(1.0), 100.0)];
        let r = resolve_effective_price(5.0, Some(99), &candidates, now());
        assert_eq!(r, PriceResolution::none());
    }

    #[test]
    fn test_quantity_discount_tiering() {
        // Spec'd catalog: 1 @ $100, 10 @ $800 ($80/unit)
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(1.0), 100.0),
            price(2, PriceLogicType::QuantityDiscount, Some(10.0), 800.0),
        ];

        let r = resolve_effective_price(5.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(1));
        assert_eq!(r.effective_price, 100.0);

        let r = resolve_effective_price(12.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(2));
        assert_eq!(r.effective_price, 80.0);
    }

    #[test]
    fn test_special_overrides_quantity() {
        let candidates = [
            price(1, PriceLogicType::Special, Some(1.0), 55.0),
            price(2, PriceLogicType::QuantityDiscount, Some(10.0), 800.0),
            price(3, PriceLogicType::LimitedOffer, Some(10.0), 700.0),
        ];

        // Regardless of quantity, the SPECIAL selection wins
        for qty in [0.5, 5.0, 100.0] {
            let r = resolve_effective_price(qty, Some(1), &candidates, now());
            assert_eq!(r.price_id, Some(1));
            assert_eq!(r.effective_price, 55.0);
        }
    }

    #[test]
    fn test_limited_offer_beats_selected_discount() {
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(1.0), 100.0),
            price(2, PriceLogicType::LimitedOffer, Some(5.0), 425.0),
        ];

        // Selected the plain discount, but a valid offer exists and its
        // tier qualifies
        let r = resolve_effective_price(6.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(2));
        assert_eq!(r.effective_price, 85.0);
    }

    #[test]
    fn test_limited_offer_falls_back_to_discount_tier() {
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(2.0), 190.0),
            price(2, PriceLogicType::LimitedOffer, Some(10.0), 800.0),
        ];

        // Offer exists but its 10-unit tier doesn't qualify at qty=4;
        // the 2-unit quantity discount does
        let r = resolve_effective_price(4.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(1));
        assert_eq!(r.effective_price, 95.0);
    }

    #[test]
    fn test_limited_offer_base_price_when_no_tier_qualifies() {
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(10.0), 800.0),
            price(2, PriceLogicType::LimitedOffer, Some(5.0), 425.0),
        ];

        // qty=1: neither the offer tier (5) nor the discount tier (10)
        // qualifies, so the offer's own base price applies
        let r = resolve_effective_price(1.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(2));
        assert_eq!(r.effective_price, 85.0);
    }

    #[test]
    fn test_expired_limited_offer_is_ignored() {
        let mut offer = price(2, PriceLogicType::LimitedOffer, Some(1.0), 50.0);
        offer.valid_until = Some(now() - chrono::Duration::days(1));
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(1.0), 100.0),
            offer,
        ];

        let r = resolve_effective_price(5.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(1));
        assert_eq!(r.effective_price, 100.0);
    }

    #[test]
    fn test_discount_fallback_to_selected_when_no_tier_qualifies() {
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(10.0), 800.0),
            price(2, PriceLogicType::QuantityDiscount, Some(20.0), 1400.0),
        ];

        let r = resolve_effective_price(5.0, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(1));
        assert_eq!(r.effective_price, 80.0);
    }

    #[test]
    fn test_tier_tie_break_is_first_in_snapshot_order() {
        let candidates = [
            price(1, PriceLogicType::QuantityDiscount, Some(10.0), 800.0),
            price(2, PriceLogicType::QuantityDiscount, Some(10.0), 750.0),
        ];

        // Same threshold: the first record in the snapshot wins, every time
        for _ in 0..3 {
            let r = resolve_effective_price(15.0, Some(2), &candidates, now());
            assert_eq!(r.price_id, Some(1));
        }
    }

    #[test]
    fn test_missing_threshold_applies_at_any_quantity() {
        let candidates = [price(1, PriceLogicType::QuantityDiscount, None, 100.0)];

        let r = resolve_effective_price(0.25, Some(1), &candidates, now());
        assert_eq!(r.price_id, Some(1));
        assert_eq!(r.effective_price, 100.0);
    }
}
