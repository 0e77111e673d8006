//! # Price Candidate Filtering
//!
//! Narrows the raw price list for a presentation down to the records that
//! can apply *here and now*, before tier resolution ever sees them.
//!
//! ## Filter Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Scope: universal price (location_id = None) not suppressed at      │
//! │     this location, OR a local price for exactly this location          │
//! │                                                                         │
//! │  2. Expiry: expired LIMITED_OFFER records are dropped                  │
//! │                                                                         │
//! │  3. Client restriction: a SPECIAL price with a non-empty enabled-      │
//! │     clients list only survives when the current client is on it        │
//! │     (empty list = available to everyone)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering by presentation and by retail/wholesale classification happens
//! upstream (the cashier's toggle); this module only handles scope, expiry
//! and client restrictions.

use chrono::{DateTime, Utc};
use mostrador_core::types::{ClientId, LocationId, Price, PriceLogicType};

/// Returns the candidate prices applicable at `location_id` for the given
/// client at time `now`, preserving snapshot order.
pub fn filter_candidate_prices(
    prices: &[Price],
    location_id: LocationId,
    client_id: Option<ClientId>,
    now: DateTime<Utc>,
) -> Vec<Price> {
    prices
        .iter()
        .filter(|p| applies_at_location(p, location_id))
        .filter(|p| !(p.logic_type == PriceLogicType::LimitedOffer && p.is_expired(now)))
        .filter(|p| client_allowed(p, client_id))
        .cloned()
        .collect()
}

fn applies_at_location(price: &Price, location_id: LocationId) -> bool {
    match price.location_id {
        // Universal price: applies everywhere unless suppressed here
        None => !price.disabled_location_ids.contains(&location_id),
        Some(scoped) => scoped == location_id,
    }
}

fn client_allowed(price: &Price, client_id: Option<ClientId>) -> bool {
    if price.logic_type != PriceLogicType::Special || price.enabled_client_ids.is_empty() {
        return true;
    }
    match client_id {
        Some(id) => price.enabled_client_ids.contains(&id),
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mostrador_core::types::{PriceId, PriceType};

    const LOCATION: LocationId = 7;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn price(price_id: PriceId, logic_type: PriceLogicType) -> Price {
        Price {
            price_id,
            product_presentation_id: 1,
            price: 100.0,
            qty_per_price: Some(1.0),
            price_type: PriceType::Minor,
            logic_type,
            location_id: None,
            valid_until: None,
            disabled_location_ids: vec![],
            enabled_client_ids: vec![],
        }
    }

    #[test]
    fn test_universal_price_applies_unless_suppressed() {
        let open = price(1, PriceLogicType::QuantityDiscount);
        let mut suppressed = price(2, PriceLogicType::QuantityDiscount);
        suppressed.disabled_location_ids = vec![LOCATION];

        let out = filter_candidate_prices(&[open, suppressed], LOCATION, None, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_id, 1);
    }

    #[test]
    fn test_local_price_only_applies_at_its_location() {
        let mut here = price(1, PriceLogicType::QuantityDiscount);
        here.location_id = Some(LOCATION);
        let mut elsewhere = price(2, PriceLogicType::QuantityDiscount);
        elsewhere.location_id = Some(99);

        let out = filter_candidate_prices(&[here, elsewhere], LOCATION, None, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_id, 1);
    }

    #[test]
    fn test_expired_limited_offer_is_dropped() {
        let mut expired = price(1, PriceLogicType::LimitedOffer);
        expired.valid_until = Some(now() - chrono::Duration::hours(1));
        let mut valid = price(2, PriceLogicType::LimitedOffer);
        valid.valid_until = Some(now() + chrono::Duration::hours(1));

        let out = filter_candidate_prices(&[expired, valid], LOCATION, None, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_id, 2);
    }

    #[test]
    fn test_special_client_restriction() {
        let mut restricted = price(1, PriceLogicType::Special);
        restricted.enabled_client_ids = vec![42];
        let unrestricted = price(2, PriceLogicType::Special);

        // No client selected: restricted SPECIAL drops, open one survives
        let out = filter_candidate_prices(
            &[restricted.clone(), unrestricted.clone()],
            LOCATION,
            None,
            now(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_id, 2);

        // The enabled client sees both
        let out = filter_candidate_prices(
            &[restricted.clone(), unrestricted.clone()],
            LOCATION,
            Some(42),
            now(),
        );
        assert_eq!(out.len(), 2);

        // A different client does not
        let out =
            filter_candidate_prices(&[restricted, unrestricted], LOCATION, Some(7), now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_id, 2);
    }

    #[test]
    fn test_snapshot_order_is_preserved() {
        let prices = vec![
            price(3, PriceLogicType::QuantityDiscount),
            price(1, PriceLogicType::QuantityDiscount),
            price(2, PriceLogicType::Special),
        ];
        let out = filter_candidate_prices(&prices, LOCATION, None, now());
        let ids: Vec<_> = out.iter().map(|p| p.price_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
