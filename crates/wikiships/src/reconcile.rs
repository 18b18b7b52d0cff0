//! Compare wiki page values against database-derived values.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeRegistry;
use crate::record::ShipRecord;

/// Absolute difference still treated as equal when both values are compared.
///
/// Inherited behaviour: the tolerance is a fixed `1` regardless of attribute
/// scale, so a mass of a million kg and a slot count of three share it.
/// Changing it silently changes which discrepancies are reported.
pub const TOLERANCE: Decimal = Decimal::ONE;

/// One recorded mismatch between a wiki page and the database.
///
/// `current` is the value found on the page, `expected` the value derived
/// from the database; either may be absent, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// The attribute's display key.
    pub attribute: String,
    /// Value currently on the wiki page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Decimal>,
    /// Value the database says should be shown, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Decimal>,
}

/// Check every fetched page against the database records.
///
/// For each ship with a page, every attribute in the registry is processed
/// from the record and extracted from the page, then compared. Ships come out
/// in page order and attributes in registry order. Ships with no findings are
/// omitted from the result. Ships whose pages were never fetched are not this
/// function's concern; the caller reports those separately as missing pages.
pub fn reconcile(
    pages: &IndexMap<String, String>,
    ships: &HashMap<String, ShipRecord>,
    registry: &AttributeRegistry,
) -> IndexMap<String, Vec<Discrepancy>> {
    let empty = ShipRecord::default();
    let mut wrong: IndexMap<String, Vec<Discrepancy>> = IndexMap::new();

    for (ship, page) in pages {
        let record = ships.get(ship).unwrap_or(&empty);

        for attribute in registry {
            let expected = match attribute.process(record) {
                Ok(value) => Some(value),
                Err(_) => {
                    debug!("Ship {} has no value in db for {}", ship, attribute);
                    None
                }
            };

            let current = match attribute.extract(page) {
                Ok(value) => value,
                Err(_) => {
                    info!("{} has no value for {}", ship, attribute);
                    if let Some(expected) = expected {
                        wrong.entry(ship.clone()).or_default().push(Discrepancy {
                            attribute: attribute.display_key().to_string(),
                            current: None,
                            expected: Some(expected),
                        });
                    }
                    continue;
                }
            };

            if exceeds_tolerance(current, expected) {
                info!("{} has incorrect value for {}", ship, attribute);
                wrong.entry(ship.clone()).or_default().push(Discrepancy {
                    attribute: attribute.display_key().to_string(),
                    current: Some(current),
                    expected,
                });
            } else {
                debug!("{} has correct value for {}", ship, attribute);
            }
        }
    }

    wrong
}

/// The comparison rule for a value found on the page.
///
/// Exact equality wins outright, but only when an expected value exists; an
/// absent expected value never equals a present one. The magnitude check then
/// substitutes zero for an absent expected value, so small stray values on
/// pages with no database counterpart are left alone.
fn exceeds_tolerance(current: Decimal, expected: Option<Decimal>) -> bool {
    if expected == Some(current) {
        return false;
    }
    (current - expected.unwrap_or(Decimal::ZERO)).abs() > TOLERANCE
}
