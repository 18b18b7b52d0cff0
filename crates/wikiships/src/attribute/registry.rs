//! The ordered collection of attributes the audit knows about.

use std::collections::HashSet;

use crate::error::{Result, WikishipsError};

use super::definition::AttributeDefinition;
use super::transform::Transform;

/// Immutable, ordered set of [`AttributeDefinition`]s.
///
/// Iteration order is declaration order, which keeps report output
/// deterministic. Display keys are unique within a registry.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    definitions: Vec<AttributeDefinition>,
}

impl AttributeRegistry {
    /// Build a registry from a list of definitions.
    ///
    /// Rejects duplicate display keys: two attributes matching the same
    /// infobox token would make comparison results ambiguous.
    pub fn from_definitions(definitions: Vec<AttributeDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if def.display_key().is_empty() {
                return Err(WikishipsError::Config(
                    "attribute with empty display key".to_string(),
                ));
            }
            if !seen.insert(def.display_key().to_string()) {
                return Err(WikishipsError::Config(format!(
                    "duplicate attribute display key '{}'",
                    def.display_key()
                )));
            }
        }
        Ok(Self { definitions })
    }

    /// The standard attribute table.
    ///
    /// Column meaning: (storage key, display key, unit, transform). The
    /// resonance attributes are stored as damage multipliers and shown as
    /// resistance percentages; target range is stored in metres and shown in
    /// kilometres; inertia is shown rounded to three places.
    pub fn standard() -> Result<Self> {
        // TODO: warp speed is still missing from the table
        const TABLE: &[(&str, &str, &str, Transform)] = &[
            ("powerOutput", "powergrid", " MW", Transform::Identity),
            ("cpuOutput", "cpu", " tf", Transform::Identity),
            ("capacitorCapacity", "capacitor", " GJ", Transform::Identity),
            ("hiSlots", "highs", "", Transform::Identity),
            ("turretSlotsLeft", "turrets", "", Transform::Identity),
            ("launcherSlotsLeft", "launchers", "", Transform::Identity),
            ("medSlots", "mediums", "", Transform::Identity),
            ("lowSlots", "lows", "", Transform::Identity),
            ("mass", "mass", " kg", Transform::Identity),
            ("volume", "volume", " m&#179", Transform::Identity),
            ("capacity", "cargohold", " m&#179", Transform::Identity),
            ("droneCapacity", "dronebay", " m&#179", Transform::Identity),
            ("droneBandwidth", "bandwidth", " Mbit/sec", Transform::Identity),
            ("hp", "structurehp", " HP", Transform::Identity),
            ("shieldCapacity", "shieldhp", " HP", Transform::Identity),
            ("armorHP", "armorhp", " HP", Transform::Identity),
            ("maxVelocity", "maxvelocity", " m/s", Transform::Identity),
            ("agility", "inertia", "", Transform::Round3),
            ("maxTargetRange", "targetrange", "", Transform::RangeToKilometers),
            ("maxLockedTargets", "maxlockedtargets", "", Transform::Identity),
            ("shieldEmDamageResonance", "shieldem", "", Transform::ResistanceToPercent),
            ("armorEmDamageResonance", "armorem", "", Transform::ResistanceToPercent),
            ("shieldExplosiveDamageResonance", "shieldexp", "", Transform::ResistanceToPercent),
            ("armorExplosiveDamageResonance", "armorexp", "", Transform::ResistanceToPercent),
            ("shieldKineticDamageResonance", "shieldkin", "", Transform::ResistanceToPercent),
            ("armorKineticDamageResonance", "armorkin", "", Transform::ResistanceToPercent),
            ("shieldThermalDamageResonance", "shieldtherm", "", Transform::ResistanceToPercent),
            ("armorThermalDamageResonance", "armortherm", "", Transform::ResistanceToPercent),
            ("scanResolution", "scanres", " mm", Transform::Identity),
        ];

        let mut definitions = Vec::with_capacity(TABLE.len());
        for (storage, display, unit, transform) in TABLE {
            definitions.push(AttributeDefinition::new(*storage, *display, *unit, *transform)?);
        }
        Self::from_definitions(definitions)
    }

    /// Iterate definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.iter()
    }

    /// Find a definition by its display key.
    pub fn get(&self, display_key: &str) -> Option<&AttributeDefinition> {
        self.definitions
            .iter()
            .find(|d| d.display_key() == display_key)
    }

    /// Number of registered attributes.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeRegistry {
    type Item = &'a AttributeDefinition;
    type IntoIter = std::slice::Iter<'a, AttributeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
