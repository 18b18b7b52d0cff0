//! Error types for the wikiships library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wikiships operations.
#[derive(Debug, Error)]
pub enum WikishipsError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the static data export database.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Error talking to the wiki API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The wiki API answered but refused or returned something unusable.
    #[error("Wiki API error: {0}")]
    Wiki(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing CSV output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for wikiships operations.
pub type Result<T> = std::result::Result<T, WikishipsError>;
