//! Wikiships: audit a ship wiki against the game's static data export.
//!
//! The wiki states each ship's fitting and defence statistics in its infobox;
//! the static data export is the authority on what those numbers should be.
//! Wikiships loads both sides, compares every known attribute and reports the
//! discrepancies — or rewrites the page text with the corrected values.
//!
//! # Example
//!
//! ```no_run
//! use wikiships::{AuditConfig, ShipAudit};
//!
//! let audit = ShipAudit::new(AuditConfig::new("eve.db")).unwrap();
//! let outcome = audit.run().unwrap();
//!
//! println!("Ships checked: {}", outcome.report.summary.ships_checked);
//! println!("Discrepancies: {}", outcome.report.summary.total_discrepancies);
//! ```

pub mod attribute;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod record;
pub mod sde;
pub mod wiki;

mod audit;

pub use attribute::{AttributeDefinition, AttributeRegistry, NotPresent, Transform};
pub use audit::{AuditConfig, AuditOutcome, AuditReport, AuditSummary, ShipAudit};
pub use error::{Result, WikishipsError};
pub use reconcile::{Discrepancy, TOLERANCE, reconcile};
pub use record::ShipRecord;
pub use sde::SdeDatabase;
pub use wiki::{WikiClient, WikiConfig};
