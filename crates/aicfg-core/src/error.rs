//! Error types for aicfg-core

use crate::validate::ValidationIssue;

/// Result type for aicfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and loading configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canonical key was revisited during one resolution
    #[error("Circular extends chain: {}", chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    /// The `extends` field has an unusable shape
    #[error("Invalid extends value: {message}")]
    InvalidExtends { message: String },

    /// An `ai.local.json` carries an `extends` field
    #[error("{path} must not contain an extends field")]
    LocalExtendsNotAllowed { path: String },

    /// The resolved document failed validation
    #[error("Configuration validation failed:\n{}", format_issues(issues))]
    Validation { issues: Vec<ValidationIssue> },

    /// Filesystem error from aicfg-fs
    #[error(transparent)]
    Fs(#[from] aicfg_fs::Error),

    /// Classification or fetch error from aicfg-source
    #[error(transparent)]
    Source(#[from] aicfg_source::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}
