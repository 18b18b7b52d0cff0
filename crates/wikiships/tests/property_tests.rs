//! Property-based tests for the transform and comparison rules.

use std::collections::HashMap;

use indexmap::IndexMap;
use proptest::prelude::*;
use rust_decimal::Decimal;

use wikiships::{AttributeDefinition, AttributeRegistry, ShipRecord, Transform, reconcile};

/// Positive decimals with a few fractional digits, the shape of wiki values.
fn wiki_value() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000, 0u32..=3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn identity_transform_is_identity(value in wiki_value()) {
        prop_assert_eq!(Transform::Identity.apply(value), value);
    }

    #[test]
    fn resistance_matches_formula(raw in (0i64..=1_000).prop_map(|m| Decimal::new(m, 3))) {
        let expected = (Decimal::ONE - raw) * Decimal::ONE_HUNDRED;
        prop_assert_eq!(Transform::ResistanceToPercent.apply(raw), expected);
    }

    #[test]
    fn extraction_recovers_written_value(value in wiki_value()) {
        let attr =
            AttributeDefinition::new("powerOutput", "powergrid", " MW", Transform::Identity)
                .unwrap();
        let page = format!("{{{{Infobox|powergrid={} MW|cpu=5 tf}}}}", value);
        prop_assert_eq!(attr.extract(&page).unwrap(), value);
    }

    #[test]
    fn values_within_one_unit_are_never_reported(
        expected in 2i64..1_000_000,
        offset_millis in -1_000i64..=1_000,
    ) {
        let expected = Decimal::from(expected);
        let current = expected + Decimal::new(offset_millis, 3);

        let registry = AttributeRegistry::from_definitions(vec![
            AttributeDefinition::new("hiSlots", "highs", "", Transform::Identity).unwrap(),
        ])
        .unwrap();

        let mut record = ShipRecord::default();
        record.insert("hiSlots", expected);
        let mut ships = HashMap::new();
        ships.insert("Rifter".to_string(), record);
        let mut pages = IndexMap::new();
        pages.insert("Rifter".to_string(), format!("|highs={}", current));

        prop_assert!(reconcile(&pages, &ships, &registry).is_empty());
    }

    #[test]
    fn values_beyond_tolerance_are_always_reported(
        expected in 2i64..1_000_000,
        excess_millis in 1i64..=1_000_000,
    ) {
        let expected = Decimal::from(expected);
        // strictly more than one unit above the expected value
        let current = expected + Decimal::ONE + Decimal::new(excess_millis, 3);

        let registry = AttributeRegistry::from_definitions(vec![
            AttributeDefinition::new("hiSlots", "highs", "", Transform::Identity).unwrap(),
        ])
        .unwrap();

        let mut record = ShipRecord::default();
        record.insert("hiSlots", expected);
        let mut ships = HashMap::new();
        ships.insert("Rifter".to_string(), record);
        let mut pages = IndexMap::new();
        pages.insert("Rifter".to_string(), format!("|highs={}", current));

        let wrong = reconcile(&pages, &ships, &registry);
        prop_assert_eq!(wrong.get("Rifter").map(Vec::len), Some(1));
    }
}
