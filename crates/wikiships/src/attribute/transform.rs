//! Numeric transforms mapping stored values to their wiki rendering.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Pure transform applied to a raw database value before comparison.
///
/// The game stores some attributes in a different shape than the wiki
/// displays them. Each variant encodes one of those display conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Value is displayed exactly as stored.
    #[default]
    Identity,
    /// Resonance to resistance percentage: `(1 - raw) * 100`.
    ResistanceToPercent,
    /// Metres to kilometres: `raw / 1000`.
    RangeToKilometers,
    /// Round to three decimal places, half away from zero.
    Round3,
}

impl Transform {
    /// Apply the transform to a raw database value.
    pub fn apply(&self, raw: Decimal) -> Decimal {
        match self {
            Transform::Identity => raw,
            Transform::ResistanceToPercent => (Decimal::ONE - raw) * Decimal::ONE_HUNDRED,
            Transform::RangeToKilometers => raw / Decimal::ONE_THOUSAND,
            Transform::Round3 => {
                raw.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }
}
