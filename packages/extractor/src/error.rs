//! Error types for the extractor.
//!
//! Only conditions that stop an operation live here. Anchors we cannot
//! interpret are warnings (see [`crate::scanner::Warning`]) and unreadable
//! pages are skipped by the walker, so neither reaches a caller as `Err`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// A relation outside husband/wife/child was used to build a person.
    #[error("Unsupported relation: '{0}'. Expected husband, wife or child")]
    UnsupportedRelation(String),

    /// A page could not be opened or read.
    #[error("Unable to read {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus glob pattern is malformed.
    #[error("Invalid corpus pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Corpus and index disagree on family multiplicities.
    #[error("Corpus does not match index: {mismatches} mismatched family identifier(s)")]
    Inconsistent { mismatches: usize },
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
