//! A single comparable ship attribute.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::record::ShipRecord;

use super::transform::Transform;
use super::NotPresent;

/// One attribute that exists both in the static data export and on the wiki.
///
/// Knows how to turn the stored value into the value the wiki should show
/// ([`process`](Self::process)) and how to pull the currently shown value out
/// of raw wikitext ([`extract`](Self::extract)).
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    storage_key: String,
    display_key: String,
    unit_suffix: String,
    transform: Transform,
    pattern: Regex,
}

impl AttributeDefinition {
    /// Create an attribute definition.
    ///
    /// `unit_suffix` is normalised to start with a space when non-empty so the
    /// pattern never matches mid-word. An empty `storage_key` marks a derived
    /// attribute with no direct database column; `process` then always reports
    /// the value as not present.
    pub fn new(
        storage_key: impl Into<String>,
        display_key: impl Into<String>,
        unit_suffix: impl Into<String>,
        transform: Transform,
    ) -> Result<Self> {
        let display_key = display_key.into();
        let unit_suffix = normalize_unit(unit_suffix.into());

        // |<key>=<digits, commas, dots>, optionally followed directly by the unit
        let mut pattern = format!(r"\|{}=([0-9,\.]+)", regex::escape(&display_key));
        if !unit_suffix.is_empty() {
            pattern.push_str(&format!("({})?", regex::escape(&unit_suffix)));
        }
        let pattern = Regex::new(&pattern)?;

        Ok(Self {
            storage_key: storage_key.into(),
            display_key,
            unit_suffix,
            transform,
            pattern,
        })
    }

    /// The attribute's column name in the static data export.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The attribute's key in the wiki infobox markup.
    pub fn display_key(&self) -> &str {
        &self.display_key
    }

    /// Unit suffix shown after the value on the wiki, with leading space.
    pub fn unit_suffix(&self) -> &str {
        &self.unit_suffix
    }

    /// The transform applied by [`process`](Self::process).
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The compiled extraction pattern for this attribute.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Compute the value the wiki should show for this ship.
    ///
    /// Looks up `storage_key` in the record and applies the transform. A ship
    /// with no stored value for this attribute is a normal, common case and is
    /// reported as [`NotPresent::InRecord`] rather than an error.
    pub fn process(&self, record: &ShipRecord) -> std::result::Result<Decimal, NotPresent> {
        let raw = record.get(&self.storage_key).ok_or(NotPresent::InRecord)?;
        Ok(self.transform.apply(raw))
    }

    /// Extract the value currently shown on a wiki page.
    ///
    /// Takes the first `|<display_key>=<number>` match in the page, strips
    /// thousands separators and parses the rest as an exact decimal. A page
    /// that does not mention the attribute is reported as
    /// [`NotPresent::OnPage`].
    pub fn extract(&self, page: &str) -> std::result::Result<Decimal, NotPresent> {
        let captures = self.pattern.captures(page).ok_or(NotPresent::OnPage)?;
        let literal = captures
            .get(1)
            .ok_or(NotPresent::OnPage)?
            .as_str()
            .replace(',', "");
        Decimal::from_str(&literal).map_err(|_| NotPresent::OnPage)
    }
}

impl fmt::Display for AttributeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_key)
    }
}

/// Units either have to be blank or start with a space.
fn normalize_unit(unit: String) -> String {
    if unit.is_empty() || unit.starts_with(' ') {
        unit
    } else {
        format!(" {}", unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn powergrid() -> AttributeDefinition {
        AttributeDefinition::new("powerOutput", "powergrid", " MW", Transform::Identity).unwrap()
    }

    #[test]
    fn unit_gets_leading_space() {
        let attr = AttributeDefinition::new("mass", "mass", "kg", Transform::Identity).unwrap();
        assert_eq!(attr.unit_suffix(), " kg");

        let attr = AttributeDefinition::new("mass", "mass", " kg", Transform::Identity).unwrap();
        assert_eq!(attr.unit_suffix(), " kg");

        let attr = AttributeDefinition::new("hiSlots", "highs", "", Transform::Identity).unwrap();
        assert_eq!(attr.unit_suffix(), "");
    }

    #[test]
    fn extract_with_thousands_separator_and_unit() {
        let value = powergrid().extract("foo |powergrid=1,234.5 MW bar").unwrap();
        assert_eq!(value, dec("1234.5"));
    }

    #[test]
    fn extract_without_unit_present() {
        let value = powergrid().extract("|powergrid=825").unwrap();
        assert_eq!(value, dec("825"));
    }

    #[test]
    fn extract_missing_key() {
        assert_eq!(
            powergrid().extract("|cpu=300 tf"),
            Err(NotPresent::OnPage)
        );
    }

    #[test]
    fn extract_takes_first_match() {
        let page = "|powergrid=100\nlater text |powergrid=200";
        assert_eq!(powergrid().extract(page).unwrap(), dec("100"));
    }

    #[test]
    fn extract_is_case_sensitive() {
        assert_eq!(
            powergrid().extract("|Powergrid=100"),
            Err(NotPresent::OnPage)
        );
    }

    #[test]
    fn process_applies_transform() {
        let attr = AttributeDefinition::new(
            "maxTargetRange",
            "targetrange",
            "",
            Transform::RangeToKilometers,
        )
        .unwrap();
        let mut record = ShipRecord::default();
        record.insert("maxTargetRange", dec("150000"));
        assert_eq!(attr.process(&record).unwrap(), dec("150"));
    }

    #[test]
    fn process_missing_storage_key() {
        let record = ShipRecord::default();
        assert_eq!(powergrid().process(&record), Err(NotPresent::InRecord));
    }

    #[test]
    fn derived_attribute_has_no_stored_value() {
        let attr = AttributeDefinition::new("", "sensorvalue", "points", Transform::Identity)
            .unwrap();
        let mut record = ShipRecord::default();
        record.insert("scanRadarStrength", dec("8"));
        assert_eq!(attr.process(&record), Err(NotPresent::InRecord));
    }
}
