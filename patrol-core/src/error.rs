//! Error types for the patrol crates.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level patrol error.
#[derive(Debug, Error)]
pub enum PatrolError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors from scanning operations.
///
/// Most conditions are contained at the smallest unit (one rule, one file)
/// and logged rather than propagated; these variants cover the cases a
/// caller must still handle, such as an unreadable workspace root.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid pattern in rule '{rule_id}': {message}")]
    InvalidPattern { rule_id: String, message: String },
    #[error("file too large: {path} ({size} bytes, limit {limit})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },
    #[error("workspace walk failed: {0}")]
    Walk(String),
    #[error("rule file parse error: {0}")]
    RuleFileParse(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from report rendering and writing.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
