//! Error types for deshak

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for deshak operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
///
/// Search misses and empty queries are not errors; they are reported
/// through [`crate::search::SearchOutcome`].
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed highlighting rule `{rule}`: {source}")]
    MalformedRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Malformed search pattern: {0}")]
    MalformedQuery(#[source] regex::Error),

    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown style tag: {0}")]
    UnknownStyle(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("{0}")]
    Usage(String),
}
