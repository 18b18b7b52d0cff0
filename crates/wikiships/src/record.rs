//! Per-ship attribute values loaded from the static data export.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw numeric attributes for one ship, keyed by storage key.
///
/// Mass, capacity and volume come straight off the primary type table and are
/// always present; everything else comes from the generic attribute join and
/// may be absent. The audit never mutates a record once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipRecord {
    values: HashMap<String, Decimal>,
}

impl ShipRecord {
    /// Create a record seeded with the always-present base columns.
    pub fn with_base(mass: Decimal, capacity: Decimal, volume: Decimal) -> Self {
        let mut record = Self::default();
        record.insert("mass", mass);
        record.insert("capacity", capacity);
        record.insert("volume", volume);
        record
    }

    /// Insert or replace one attribute value.
    pub fn insert(&mut self, storage_key: impl Into<String>, value: Decimal) {
        self.values.insert(storage_key.into(), value);
    }

    /// Look up an attribute value by storage key.
    pub fn get(&self, storage_key: &str) -> Option<Decimal> {
        self.values.get(storage_key).copied()
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
