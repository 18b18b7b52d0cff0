//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Wikiships: audit the ship wiki against the static data export
#[derive(Parser)]
#[command(name = "wikiships")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare wiki pages against the database and report discrepancies
    Check {
        /// Path to the static data export sqlite dump
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// File to write the report to (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// Seconds to wait between wiki request batches
        #[arg(short, long, default_value = "15")]
        pause: u64,

        /// Only audit the first N ships, alphabetically
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Rewrite wiki pages with corrected values
    Fix {
        /// Path to the static data export sqlite dump
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// Wiki account to edit with; password read from WIKI_PASSWORD
        #[arg(short, long)]
        username: String,

        /// Seconds to wait between wiki requests
        #[arg(short, long, default_value = "15")]
        pause: u64,

        /// Only audit the first N ships, alphabetically
        #[arg(long)]
        limit: Option<usize>,

        /// Print the rewritten pages instead of editing the wiki
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One human-readable line per discrepancy
    Text,
    /// CSV with article links
    Csv,
    /// Full report as JSON
    Json,
}
