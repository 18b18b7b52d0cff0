//! Wikiships CLI - find and fix incorrect ship statistics on the wiki.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .init();

    let result = match cli.command {
        Commands::Check {
            database,
            output,
            format,
            pause,
            limit,
        } => commands::check::run(database, output, format, pause, limit),

        Commands::Fix {
            database,
            username,
            pause,
            limit,
            dry_run,
        } => commands::fix::run(database, username, pause, limit, dry_run),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
