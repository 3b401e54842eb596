//! Error types for aicfg-fs

use std::path::PathBuf;

/// Result type for aicfg-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in aicfg-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin} as JSON: {message} (line {line}, column {column})")]
    Parse {
        /// File path or URL the text came from
        origin: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration at {origin} is not a JSON object")]
    NotAnObject { origin: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
