//! Main audit orchestrator and public report types.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeRegistry;
use crate::error::{Result, WikishipsError};
use crate::reconcile::{Discrepancy, reconcile};
use crate::record::ShipRecord;
use crate::sde::SdeDatabase;
use crate::wiki::{WikiClient, WikiConfig};

/// Configuration for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Path to the static data export dump.
    pub database: PathBuf,
    /// Wiki endpoint and pacing.
    pub wiki: WikiConfig,
    /// Base URL for links to articles in reports.
    pub page_url: String,
    /// Audit only the first N ships, alphabetically (None = all).
    pub limit: Option<usize>,
}

impl AuditConfig {
    /// Configuration for a local dump with default wiki settings.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            wiki: WikiConfig::default(),
            page_url: "https://wiki.eveuniversity.org".to_string(),
            limit: None,
        }
    }
}

/// Result of auditing the wiki against the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Per-ship discrepancies, ships with none omitted.
    pub discrepancies: IndexMap<String, Vec<Discrepancy>>,
    /// Ships with no wiki page at all.
    pub missing_pages: Vec<String>,
    /// Headline numbers.
    pub summary: AuditSummary,
    /// When the audit ran.
    pub generated_at: DateTime<Utc>,
}

impl AuditReport {
    /// Save the report as a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WikishipsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously saved report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WikishipsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Summary of an audit run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Ships whose pages were fetched and compared.
    pub ships_checked: usize,
    /// Ships with at least one discrepancy.
    pub ships_with_issues: usize,
    /// Total discrepancies across all ships.
    pub total_discrepancies: usize,
    /// Ships without a wiki page.
    pub missing_pages: usize,
}

/// An audit report together with the page text it was computed from.
///
/// The pages are kept so corrected wikitext can be produced without a second
/// fetch pass.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub pages: IndexMap<String, String>,
}

/// The audit engine: loads ships, fetches pages, reconciles.
pub struct ShipAudit {
    config: AuditConfig,
    registry: AttributeRegistry,
}

impl ShipAudit {
    /// Create an audit over the standard attribute table.
    pub fn new(config: AuditConfig) -> Result<Self> {
        Ok(Self {
            config,
            registry: AttributeRegistry::standard()?,
        })
    }

    /// Create an audit over a custom attribute registry.
    pub fn with_registry(config: AuditConfig, registry: AttributeRegistry) -> Self {
        Self { config, registry }
    }

    /// The registry this audit compares against.
    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Run the full audit: load, fetch, reconcile.
    pub fn run(&self) -> Result<AuditOutcome> {
        let ships = SdeDatabase::open(&self.config.database)?.ships()?;
        info!("Loaded {} ships from {}", ships.len(), self.config.database.display());

        let mut names: Vec<String> = ships.keys().cloned().collect();
        names.sort();
        if let Some(limit) = self.config.limit {
            names.truncate(limit);
        }

        let wiki = WikiClient::new(self.config.wiki.clone())?;
        let (pages, missing_pages) = wiki.get_pages(&names)?;

        Ok(self.conclude(pages, &ships, missing_pages))
    }

    /// Reconcile already-fetched pages and assemble the report.
    pub fn conclude(
        &self,
        pages: IndexMap<String, String>,
        ships: &HashMap<String, ShipRecord>,
        missing_pages: Vec<String>,
    ) -> AuditOutcome {
        let discrepancies = reconcile(&pages, ships, &self.registry);

        let summary = AuditSummary {
            ships_checked: pages.len(),
            ships_with_issues: discrepancies.len(),
            total_discrepancies: discrepancies.values().map(Vec::len).sum(),
            missing_pages: missing_pages.len(),
        };

        AuditOutcome {
            report: AuditReport {
                discrepancies,
                missing_pages,
                summary,
                generated_at: Utc::now(),
            },
            pages,
        }
    }

    /// Base URL for article links, as configured.
    pub fn page_url(&self) -> &str {
        &self.config.page_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeDefinition, Transform};
    use rust_decimal::Decimal;

    #[test]
    fn conclude_builds_summary() {
        let registry = AttributeRegistry::from_definitions(vec![
            AttributeDefinition::new("hiSlots", "highs", "", Transform::Identity).unwrap(),
        ])
        .unwrap();
        let audit = ShipAudit::with_registry(AuditConfig::new("unused.db"), registry);

        let mut pages = IndexMap::new();
        pages.insert("Rifter".to_string(), "|highs=4".to_string());
        pages.insert("Punisher".to_string(), "|highs=4".to_string());

        let mut ships = HashMap::new();
        let mut rifter = ShipRecord::default();
        rifter.insert("hiSlots", Decimal::from(3));
        ships.insert("Rifter".to_string(), rifter);
        let mut punisher = ShipRecord::default();
        punisher.insert("hiSlots", Decimal::from(4));
        ships.insert("Punisher".to_string(), punisher);

        let outcome = audit.conclude(pages, &ships, vec!["Ghost Ship".to_string()]);
        let summary = &outcome.report.summary;
        assert_eq!(summary.ships_checked, 2);
        assert_eq!(summary.ships_with_issues, 1);
        assert_eq!(summary.total_discrepancies, 1);
        assert_eq!(summary.missing_pages, 1);
        assert_eq!(outcome.report.missing_pages, vec!["Ghost Ship"]);
    }

    #[test]
    fn report_save_load_round_trip() {
        let registry = AttributeRegistry::from_definitions(vec![
            AttributeDefinition::new("hiSlots", "highs", "", Transform::Identity).unwrap(),
        ])
        .unwrap();
        let audit = ShipAudit::with_registry(AuditConfig::new("unused.db"), registry);

        let mut pages = IndexMap::new();
        pages.insert("Rifter".to_string(), "|highs=4".to_string());
        let mut ships = HashMap::new();
        let mut rifter = ShipRecord::default();
        rifter.insert("hiSlots", Decimal::from(3));
        ships.insert("Rifter".to_string(), rifter);

        let report = audit.conclude(pages, &ships, vec![]).report;

        let file = tempfile::NamedTempFile::new().unwrap();
        report.save(file.path()).unwrap();
        let loaded = AuditReport::load(file.path()).unwrap();

        assert_eq!(loaded.discrepancies, report.discrepancies);
        assert_eq!(loaded.summary.total_discrepancies, 1);
    }

    #[test]
    fn load_missing_report_names_the_path() {
        let err = AuditReport::load("/nonexistent/report.json").unwrap_err();
        assert!(matches!(err, WikishipsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/report.json"));
    }
}
