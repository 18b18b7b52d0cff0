//! Integration tests for wikiships.

use std::collections::HashMap;
use std::str::FromStr;

use indexmap::IndexMap;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use wikiships::{
    AttributeRegistry, AuditConfig, SdeDatabase, ShipAudit, ShipRecord, format, reconcile,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A trimmed but realistic infobox for the Rifter, consistent with
/// [`rifter_record`].
const RIFTER_PAGE: &str = "\
{{ShipArticle
|shipimg=Rifter.jpg
|highs=4
|turrets=3
|launchers=2
|mediums=3
|lows=3
|mass=1,067,000 kg
|volume=27,289 m&#179
|cargohold=140 m&#179
|powergrid=37.5 MW
|cpu=125 tf
|maxvelocity=365 m/s
|inertia=3.19
|targetrange=22.5
|shieldem=50
}}";

fn rifter_record() -> ShipRecord {
    let mut record = ShipRecord::with_base(dec("1067000"), dec("140"), dec("27289"));
    record.insert("hiSlots", dec("4"));
    record.insert("turretSlotsLeft", dec("3"));
    record.insert("launcherSlotsLeft", dec("2"));
    record.insert("medSlots", dec("3"));
    record.insert("lowSlots", dec("3"));
    record.insert("powerOutput", dec("37.5"));
    record.insert("cpuOutput", dec("125"));
    record.insert("maxVelocity", dec("365"));
    record.insert("agility", dec("3.19"));
    record.insert("maxTargetRange", dec("22500"));
    record.insert("shieldEmDamageResonance", dec("0.5"));
    record
}

fn one_ship(page: &str) -> (IndexMap<String, String>, HashMap<String, ShipRecord>) {
    let mut pages = IndexMap::new();
    pages.insert("Rifter".to_string(), page.to_string());
    let mut ships = HashMap::new();
    ships.insert("Rifter".to_string(), rifter_record());
    (pages, ships)
}

#[test]
fn consistent_ship_produces_no_findings() {
    let registry = AttributeRegistry::standard().unwrap();
    let (pages, ships) = one_ship(RIFTER_PAGE);
    let wrong = reconcile(&pages, &ships, &registry);
    assert!(wrong.is_empty(), "unexpected findings: {:?}", wrong);
}

#[test]
fn perturbed_page_is_caught() {
    let registry = AttributeRegistry::standard().unwrap();
    let page = RIFTER_PAGE
        .replace("|highs=4", "|highs=2")
        .replace("|maxvelocity=365 m/s", "|maxvelocity=365.5 m/s")
        .replace("|shieldem=50\n", "");
    let (pages, ships) = one_ship(&page);

    let wrong = reconcile(&pages, &ships, &registry);
    let findings = wrong.get("Rifter").expect("Rifter should have findings");

    // maxvelocity moved by half a unit: within tolerance, not reported
    assert_eq!(findings.len(), 2);

    assert_eq!(findings[0].attribute, "highs");
    assert_eq!(findings[0].current, Some(dec("2")));
    assert_eq!(findings[0].expected, Some(dec("4")));

    assert_eq!(findings[1].attribute, "shieldem");
    assert_eq!(findings[1].current, None);
    assert_eq!(findings[1].expected, Some(dec("50")));
}

#[test]
fn report_and_formats_end_to_end() {
    let registry = AttributeRegistry::standard().unwrap();
    let audit = ShipAudit::with_registry(AuditConfig::new("unused.db"), registry);

    let page = RIFTER_PAGE.replace("|powergrid=37.5 MW", "|powergrid=40 MW");
    let (pages, ships) = one_ship(&page);
    let outcome = audit.conclude(pages, &ships, vec!["Ghost Ship".to_string()]);

    assert_eq!(outcome.report.summary.ships_checked, 1);
    assert_eq!(outcome.report.summary.ships_with_issues, 1);
    assert_eq!(outcome.report.summary.total_discrepancies, 1);
    assert_eq!(outcome.report.summary.missing_pages, 1);

    let text = format::text(&outcome.report);
    assert!(text.contains("Rifter has powergrid as 40 but should be 37.5"));
    assert!(text.contains("Missing from wiki: Ghost Ship"));

    let csv = format::csv(&outcome.report, audit.page_url()).unwrap();
    assert!(csv.contains("Rifter,powergrid,40,37.5,"));
    assert!(csv.contains("Ghost Ship,Missing page"));

    let corrected = format::corrected_pages(&outcome.report, &outcome.pages, audit.registry());
    let fixed = corrected.get("Rifter").unwrap();
    assert!(fixed.contains("|powergrid=37.5 MW"));
    assert!(!fixed.contains("|powergrid=40"));
    // everything else untouched
    assert!(fixed.contains("|cpu=125 tf"));
}

#[test]
fn sde_dump_round_trip() {
    let file = NamedTempFile::new().expect("temp db");

    let conn = Connection::open(file.path()).unwrap();
    conn.execute_batch(
        "CREATE TABLE invTypes (
            typeID INTEGER PRIMARY KEY, groupID INTEGER, typeName TEXT,
            mass REAL, capacity REAL, volume REAL, published INTEGER);
        CREATE TABLE invGroups (groupID INTEGER PRIMARY KEY, categoryID INTEGER);
        CREATE TABLE dgmAttributeTypes (attributeID INTEGER PRIMARY KEY, attributeName TEXT);
        CREATE TABLE dgmTypeAttributes (
            typeID INTEGER, attributeID INTEGER, valueInt INTEGER, valueFloat REAL);

        INSERT INTO invGroups VALUES (25, 6);
        INSERT INTO invTypes VALUES (587, 25, 'Rifter', 1067000.0, 140.0, 27289.0, 1);
        INSERT INTO dgmAttributeTypes VALUES (14, 'hiSlots');
        INSERT INTO dgmTypeAttributes VALUES (587, 14, 4, NULL);",
    )
    .unwrap();
    drop(conn);

    let ships = SdeDatabase::open(file.path()).unwrap().ships().unwrap();
    let rifter = ships.get("Rifter").expect("Rifter loaded");
    assert_eq!(rifter.get("hiSlots"), Some(dec("4")));
    assert_eq!(rifter.get("mass"), Some(dec("1067000")));

    // feed the loaded record straight into reconciliation
    let registry = AttributeRegistry::standard().unwrap();
    let mut pages = IndexMap::new();
    pages.insert("Rifter".to_string(), "|highs=2".to_string());
    let wrong = reconcile(&pages, &ships, &registry);
    let findings = wrong.get("Rifter").unwrap();
    assert!(
        findings
            .iter()
            .any(|d| d.attribute == "highs"
                && d.current == Some(dec("2"))
                && d.expected == Some(dec("4")))
    );
}
