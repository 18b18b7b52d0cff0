//! Ship records from the static data export (an sqlite dump).

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use rusqlite::{Connection, OpenFlags};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::Result;
use crate::record::ShipRecord;

/// Location of the static dump, for users who do not have one locally.
pub const SDE_DUMP_URL: &str =
    "http://www.fuzzwork.co.uk/dump/retribution-1.0.7-463858/eve.sqlite.bz2";

/// Join the type table against the generic attribute table, restricted to
/// published ships (category 6). One row per (ship, attribute).
const SHIP_QUERY: &str = "\
    SELECT types.typeName, types.mass, types.capacity, types.volume, \
    attributes.attributeName, attTypes.valueInt, attTypes.valueFloat \
    FROM invTypes types \
    INNER JOIN dgmTypeAttributes attTypes ON attTypes.typeID = types.typeID \
    INNER JOIN dgmAttributeTypes attributes ON attributes.attributeID = attTypes.attributeID \
    INNER JOIN invGroups ON types.groupID = invGroups.groupID \
    WHERE invGroups.categoryID = 6 AND types.published = 1";

/// Read-only handle on a static data export database.
pub struct SdeDatabase {
    conn: Connection,
}

impl SdeDatabase {
    /// Open a dump file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (e.g. an in-memory fixture).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load all published ships with their raw attribute values.
    ///
    /// Base columns (mass, capacity, volume) seed each record; the attribute
    /// join fills in the rest, preferring `valueInt` over `valueFloat` with
    /// zero as the fallback, as the dump leaves one of the two NULL. A value
    /// that cannot be represented as a decimal is a data-quality problem in
    /// the dump: it is logged and the attribute left absent, so the
    /// reconciler sees it as "no expected value" rather than aborting.
    pub fn ships(&self) -> Result<HashMap<String, ShipRecord>> {
        let mut stmt = self.conn.prepare(SHIP_QUERY)?;
        let mut rows = stmt.query([])?;

        let mut ships: HashMap<String, ShipRecord> = HashMap::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            let mass: Option<f64> = row.get(1)?;
            let capacity: Option<f64> = row.get(2)?;
            let volume: Option<f64> = row.get(3)?;
            let attribute: String = row.get(4)?;
            let value_int: Option<i64> = row.get(5)?;
            let value_float: Option<f64> = row.get(6)?;

            let record = ships.entry(name.clone()).or_insert_with(|| {
                ShipRecord::with_base(
                    base_value(mass),
                    base_value(capacity),
                    base_value(volume),
                )
            });

            match attribute_value(value_int, value_float) {
                Some(value) => record.insert(attribute, value),
                None => warn!(
                    "Invalid value for {} on {} with value {:?}",
                    attribute, name, value_float
                ),
            }
        }

        debug!("Ships fetched: {}", ships.len());
        Ok(ships)
    }
}

fn base_value(value: Option<f64>) -> Decimal {
    value.and_then(Decimal::from_f64).unwrap_or(Decimal::ZERO)
}

/// `valueInt` unless NULL or zero, else `valueFloat`, else zero.
fn attribute_value(value_int: Option<i64>, value_float: Option<f64>) -> Option<Decimal> {
    match value_int {
        Some(i) if i != 0 => Some(Decimal::from(i)),
        _ => match value_float {
            Some(f) if f != 0.0 => Decimal::from_f64(f),
            _ => Some(Decimal::ZERO),
        },
    }
}
