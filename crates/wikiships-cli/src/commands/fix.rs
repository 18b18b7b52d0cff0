//! Fix command - push corrected values back to the wiki.

use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use colored::Colorize;
use log::info;
use wikiships::{AuditConfig, ShipAudit, WikiClient, format};

pub fn run(
    database: PathBuf,
    username: String,
    pause: u64,
    limit: Option<usize>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !database.exists() {
        return Err(format!("Database not found: {}", database.display()).into());
    }

    let mut config = AuditConfig::new(database);
    config.wiki.delay = Duration::from_secs(pause);
    config.limit = limit;

    let audit = ShipAudit::new(config.clone())?;
    let outcome = audit.run()?;
    let corrected = format::corrected_pages(&outcome.report, &outcome.pages, audit.registry());

    if corrected.is_empty() {
        println!("{}", "Nothing to fix".green().bold());
        return Ok(());
    }

    println!(
        "{} {} pages",
        (if dry_run { "Would edit" } else { "Editing" }).cyan().bold(),
        corrected.len().to_string().white()
    );

    if dry_run {
        for (title, content) in &corrected {
            println!("{}", format!("== {} ==", title).yellow().bold());
            println!("{}", content);
        }
        return Ok(());
    }

    let password = std::env::var("WIKI_PASSWORD")
        .map_err(|_| "WIKI_PASSWORD environment variable not set")?;

    let mut wiki = WikiClient::new(config.wiki.clone())?;
    wiki.login(&username, &password)?;

    let delay = Duration::from_secs(pause);
    for (index, (title, content)) in corrected.iter().enumerate() {
        if index > 0 {
            sleep(delay);
        }
        info!("Editing page {}", title);
        wiki.edit_page(title, content)?;
        println!("{} {}", "Edited".green(), title);
    }

    Ok(())
}
