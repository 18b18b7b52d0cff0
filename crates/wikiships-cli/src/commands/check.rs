//! Check command - audit the wiki and write a discrepancy report.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use wikiships::{AuditConfig, ShipAudit, format};

use crate::cli::ReportFormat;

pub fn run(
    database: PathBuf,
    output: Option<PathBuf>,
    report_format: ReportFormat,
    pause: u64,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !database.exists() {
        return Err(format!(
            "Database not found: {} (download a dump from {})",
            database.display(),
            wikiships::sde::SDE_DUMP_URL
        )
        .into());
    }

    println!(
        "{} wiki against {}",
        "Auditing".cyan().bold(),
        database.display().to_string().white()
    );

    let mut config = AuditConfig::new(database);
    config.wiki.delay = Duration::from_secs(pause);
    config.limit = limit;

    let audit = ShipAudit::new(config)?;
    let outcome = audit.run()?;
    let summary = &outcome.report.summary;

    println!(
        "Checked {} ships: {} with issues, {} discrepancies, {} missing pages",
        summary.ships_checked.to_string().white().bold(),
        summary.ships_with_issues.to_string().yellow(),
        summary.total_discrepancies.to_string().red(),
        summary.missing_pages.to_string().blue()
    );

    let rendered = match report_format {
        ReportFormat::Text => format::text(&outcome.report),
        ReportFormat::Csv => format::csv(&outcome.report, audit.page_url())?,
        ReportFormat::Json => format::json(&outcome.report)?,
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }

    Ok(())
}
