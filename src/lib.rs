//! Lexgrove: a resumable scraper for hierarchical legal-code collections
//!
//! This crate walks a jurisdiction's code or regulation hierarchy on Justia
//! depth-first and flattens it into an append-only JSONL log, one record per
//! terminal document. Interrupted runs resume from the lexicographic path of
//! the last record written, skipping already-completed subtrees without
//! re-fetching them.

pub mod config;
pub mod crawler;
pub mod cursor;
pub mod output;
pub mod progress;

use thiserror::Error;

/// Main error type for lexgrove operations
#[derive(Debug, Error)]
pub enum LexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("Root discovery failed for {url}: {reason}")]
    RootDiscovery { url: String, reason: String },

    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for lexgrove operations
pub type Result<T> = std::result::Result<T, LexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, DatasetKind, JobSpec};
pub use cursor::LexPath;
pub use output::Record;
