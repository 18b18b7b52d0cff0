//! Render an audit report as text, CSV or corrected wikitext.

use indexmap::IndexMap;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::attribute::AttributeRegistry;
use crate::audit::AuditReport;
use crate::error::{Result, WikishipsError};

/// Render a discrepancy value, or `missing` for an absent one.
fn value_or_missing(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "missing".to_string(),
    }
}

/// Format a corrected value for insertion into wikitext.
///
/// At most three decimal places, trailing zeros stripped, never a trailing
/// `.0`.
pub fn wiki_literal(value: Decimal) -> String {
    value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// One human-readable line per discrepancy, missing pages at the end.
pub fn text(report: &AuditReport) -> String {
    let mut lines = Vec::new();
    for (ship, wrong) in &report.discrepancies {
        for d in wrong {
            lines.push(format!(
                "{} has {} as {} but should be {}",
                ship,
                d.attribute,
                value_or_missing(d.current),
                value_or_missing(d.expected)
            ));
        }
    }
    if !report.missing_pages.is_empty() {
        lines.push(format!(
            "Missing from wiki: {}",
            report.missing_pages.join(", ")
        ));
    }
    lines.join("\n")
}

/// The full report as pretty-printed JSON.
pub fn json(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// CSV with one row per discrepancy plus a row per missing page.
pub fn csv(report: &AuditReport, page_url: &str) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Ship", "Attribute", "Current Value", "Correct Value", "Link"])?;

    for (ship, wrong) in &report.discrepancies {
        let link = article_link(page_url, ship);
        for d in wrong {
            let row = [
                ship.clone(),
                d.attribute.clone(),
                d.current.map(|v| v.to_string()).unwrap_or_default(),
                d.expected.map(|v| v.to_string()).unwrap_or_default(),
                link.clone(),
            ];
            debug!("Row: {}", row.join(", "));
            writer.write_record(&row)?;
        }
    }
    for ship in &report.missing_pages {
        let link = article_link(page_url, ship);
        writer.write_record([ship.as_str(), "Missing page", "", "", link.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| WikishipsError::Config(format!("flushing csv output: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| WikishipsError::Config(format!("csv output: {}", e)))
}

fn article_link(page_url: &str, title: &str) -> String {
    format!(
        "{}/{}",
        page_url.trim_end_matches('/'),
        urlencoding::encode(title)
    )
}

/// Rewrite each affected page with the corrected values.
///
/// For every discrepancy with a known expected value, the first matched
/// `|key=value` token is replaced in place; the rest of the page is left
/// untouched. Discrepancies where the page has no token at all (current
/// absent) cannot be fixed in place and are skipped. Returns only the pages
/// that actually changed.
pub fn corrected_pages(
    report: &AuditReport,
    pages: &IndexMap<String, String>,
    registry: &AttributeRegistry,
) -> IndexMap<String, String> {
    let mut corrected = IndexMap::new();

    for (ship, wrong) in &report.discrepancies {
        let Some(original) = pages.get(ship) else {
            continue;
        };
        let mut page = original.clone();

        for d in wrong {
            let (Some(expected), Some(_)) = (d.expected, d.current) else {
                continue;
            };
            let Some(definition) = registry.get(&d.attribute) else {
                continue;
            };
            let literal = wiki_literal(expected);
            page = definition
                .pattern()
                .replace(&page, |caps: &regex::Captures| {
                    let unit = caps.get(2).map_or("", |m| m.as_str());
                    format!("|{}={}{}", d.attribute, literal, unit)
                })
                .into_owned();
        }

        if page != *original {
            corrected.insert(ship.clone(), page);
        }
    }

    corrected
}
